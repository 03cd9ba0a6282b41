use askama::Template;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use vitrin_http::error::AppError;
use vitrin_kernel::AppState;

use super::views::{
    category_chips, page_links, CategoryCardView, CategoryChipView, PageLinkView, ProductCardView,
    ProductDetailView, SiteChrome, VideoCardView,
};
use crate::modules::{categories, company, products, videos, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Template wrapper that converts Askama templates into HTML responses.
struct HtmlTemplate<T>(T);

impl<T> IntoResponse for HtmlTemplate<T>
where
    T: Template,
{
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to render template: {err}"),
            )
                .into_response(),
        }
    }
}

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate {
    chrome: SiteChrome,
    products: Vec<ProductCardView>,
    has_products: bool,
    categories: Vec<CategoryCardView>,
    has_categories: bool,
}

#[derive(Template)]
#[template(path = "products.html")]
struct ProductsTemplate {
    chrome: SiteChrome,
    heading: String,
    subheading: String,
    chips: Vec<CategoryChipView>,
    has_chips: bool,
    all_selected: bool,
    products: Vec<ProductCardView>,
    has_products: bool,
    showing: usize,
    pagination: Vec<PageLinkView>,
    has_pagination: bool,
}

#[derive(Template)]
#[template(path = "product_detail.html")]
struct ProductDetailTemplate {
    chrome: SiteChrome,
    product: ProductDetailView,
}

#[derive(Template)]
#[template(path = "videos.html")]
struct VideosTemplate {
    chrome: SiteChrome,
    videos: Vec<VideoCardView>,
    has_videos: bool,
}

#[derive(Template)]
#[template(path = "contact.html")]
struct ContactTemplate {
    chrome: SiteChrome,
}

#[derive(Template)]
#[template(path = "not_found.html")]
struct NotFoundTemplate {
    chrome: SiteChrome,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/products", get(catalog))
        .route("/products/{slug}", get(product_detail))
        .route("/videos", get(video_gallery))
        .route("/contact", get(contact))
        .fallback(not_found)
        .with_state(state)
}

async fn load_chrome(state: &AppState) -> Result<SiteChrome, AppError> {
    let settings = company::repo::load(&state.db).await?;
    Ok(SiteChrome::from_settings(&settings))
}

async fn home(State(state): State<AppState>) -> Result<HtmlTemplate<HomeTemplate>, AppError> {
    let chrome = load_chrome(&state).await?;
    let featured = products::repo::list(&state.db, 1, 5, None).await?;
    let categories = categories::repo::list_all(&state.db).await?;

    let cards: Vec<_> = featured
        .docs
        .iter()
        .map(|p| ProductCardView::build(p, &categories))
        .collect();
    let category_cards: Vec<_> = categories
        .iter()
        .take(10)
        .map(CategoryCardView::build)
        .collect();

    Ok(HtmlTemplate(HomeTemplate {
        chrome,
        has_products: !cards.is_empty(),
        products: cards,
        has_categories: !category_cards.is_empty(),
        categories: category_cards,
    }))
}

#[derive(Debug, Default, Deserialize)]
struct CatalogParams {
    page: Option<i64>,
    category: Option<String>,
}

async fn catalog(
    State(state): State<AppState>,
    Query(params): Query<CatalogParams>,
) -> Result<HtmlTemplate<ProductsTemplate>, AppError> {
    let chrome = load_chrome(&state).await?;
    let page = params.page.unwrap_or(1).max(1);
    let selected = params.category.as_deref();

    let all_categories = categories::repo::list_all(&state.db).await?;
    let listing = products::repo::list(&state.db, page, DEFAULT_PAGE_SIZE, selected).await?;

    let current = selected.and_then(|slug| all_categories.iter().find(|c| c.slug == slug));
    let (heading, subheading) = match current {
        Some(category) => (
            category.name.clone(),
            format!("Browse our {} collection", category.name),
        ),
        None => (
            "All Products".to_string(),
            "Explore our complete range of electrical products".to_string(),
        ),
    };

    let cards: Vec<_> = listing
        .docs
        .iter()
        .map(|p| ProductCardView::build(p, &all_categories))
        .collect();
    let chips = category_chips(&all_categories, selected);

    Ok(HtmlTemplate(ProductsTemplate {
        chrome,
        heading,
        subheading,
        has_chips: !chips.is_empty(),
        chips,
        all_selected: selected.is_none(),
        has_products: !cards.is_empty(),
        showing: cards.len(),
        products: cards,
        pagination: page_links(listing.page, listing.total_pages, selected),
        has_pagination: listing.total_pages > 1,
    }))
}

async fn product_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Response, AppError> {
    let chrome = load_chrome(&state).await?;
    let Some(product) = products::repo::find_by_slug(&state.db, &slug).await? else {
        return Ok(render_not_found(chrome));
    };
    let category = categories::repo::find_by_id(&state.db, product.category_id).await?;

    Ok(HtmlTemplate(ProductDetailTemplate {
        chrome,
        product: ProductDetailView::build(&product, category.as_ref()),
    })
    .into_response())
}

async fn video_gallery(
    State(state): State<AppState>,
) -> Result<HtmlTemplate<VideosTemplate>, AppError> {
    let chrome = load_chrome(&state).await?;
    let listing = videos::repo::list(&state.db, 1, MAX_PAGE_SIZE).await?;
    let cards: Vec<_> = listing.docs.iter().map(VideoCardView::build).collect();

    Ok(HtmlTemplate(VideosTemplate {
        chrome,
        has_videos: !cards.is_empty(),
        videos: cards,
    }))
}

async fn contact(
    State(state): State<AppState>,
) -> Result<HtmlTemplate<ContactTemplate>, AppError> {
    let chrome = load_chrome(&state).await?;
    Ok(HtmlTemplate(ContactTemplate { chrome }))
}

async fn not_found(State(state): State<AppState>) -> Result<Response, AppError> {
    let chrome = load_chrome(&state).await?;
    Ok(render_not_found(chrome))
}

fn render_not_found(chrome: SiteChrome) -> Response {
    let mut response = HtmlTemplate(NotFoundTemplate { chrome }).into_response();
    *response.status_mut() = StatusCode::NOT_FOUND;
    response
}
