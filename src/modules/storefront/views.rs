//! View models for the storefront templates.
//!
//! Templates receive pre-flattened structs: display strings plus `has_*`
//! flags, so the templates themselves never touch `Option` or money
//! types. Everything here is pure and unit-tested.

use chrono::{Datelike, Utc};

use crate::modules::categories::models::Category;
use crate::modules::company::models::{CompanySettings, SocialPlatform};
use crate::modules::products::models::Product;
use crate::modules::videos::models::Video;
use crate::utils;

/// Layout chrome shared by every page: header, nav and footer content,
/// built from the company settings document on each render.
#[derive(Debug, Clone)]
pub struct SiteChrome {
    pub site_title: String,
    pub gst_no: String,
    pub has_gst_no: bool,
    pub msme_no: String,
    pub has_msme_no: bool,
    pub phones: Vec<String>,
    pub has_phone: bool,
    pub call_href: String,
    pub email: String,
    pub has_email: bool,
    pub address: String,
    pub has_address: bool,
    pub whatsapp_url: String,
    pub has_whatsapp: bool,
    pub maps_link: String,
    pub has_maps_link: bool,
    pub social_links: Vec<SocialLinkView>,
    pub has_socials: bool,
    pub year: i32,
}

#[derive(Debug, Clone)]
pub struct SocialLinkView {
    pub platform: String,
    pub url: String,
}

impl SiteChrome {
    pub fn from_settings(settings: &CompanySettings) -> Self {
        let phone_field = settings.contact.phone.as_deref().unwrap_or("");
        let phones = utils::split_phones(phone_field);
        let whatsapp = utils::whatsapp_link(phone_field);
        let call_href = phones
            .first()
            .map(|p| format!("tel:{p}"))
            .unwrap_or_default();

        Self {
            site_title: settings.site_title.clone(),
            gst_no: settings.gst_no.clone().unwrap_or_default(),
            has_gst_no: settings.gst_no.is_some(),
            msme_no: settings.msme_no.clone().unwrap_or_default(),
            has_msme_no: settings.msme_no.is_some(),
            has_phone: !phones.is_empty(),
            phones,
            call_href,
            email: settings.contact.email.clone().unwrap_or_default(),
            has_email: settings.contact.email.is_some(),
            address: settings.contact.address.clone().unwrap_or_default(),
            has_address: settings.contact.address.is_some(),
            has_whatsapp: whatsapp.is_some(),
            whatsapp_url: whatsapp.unwrap_or_default(),
            maps_link: settings.google_maps_link.clone().unwrap_or_default(),
            has_maps_link: settings.google_maps_link.is_some(),
            has_socials: !settings.social_links.is_empty(),
            social_links: settings
                .social_links
                .iter()
                .map(|link| SocialLinkView {
                    platform: platform_label(link.platform).to_string(),
                    url: link.url.clone(),
                })
                .collect(),
            year: Utc::now().year(),
        }
    }
}

fn platform_label(platform: SocialPlatform) -> &'static str {
    match platform {
        SocialPlatform::Facebook => "Facebook",
        SocialPlatform::YouTube => "YouTube",
        SocialPlatform::Instagram => "Instagram",
    }
}

/// Product card for grids on the home and catalog pages.
#[derive(Debug, Clone)]
pub struct ProductCardView {
    pub title: String,
    pub slug: String,
    pub category_name: String,
    pub has_category: bool,
    pub price_display: String,
    pub has_price: bool,
    pub image_url: String,
    pub image_alt: String,
    pub has_image: bool,
}

impl ProductCardView {
    pub fn build(product: &Product, categories: &[Category]) -> Self {
        let category_name = categories
            .iter()
            .find(|c| c.id == product.category_id)
            .map(|c| c.name.clone());
        let first_image = product.images.first();

        Self {
            title: product.title.clone(),
            slug: product.slug.clone(),
            has_category: category_name.is_some(),
            category_name: category_name.unwrap_or_default(),
            price_display: product
                .price
                .map(|p| format!("₹{}", utils::format_inr(p)))
                .unwrap_or_default(),
            has_price: product.price.is_some(),
            image_url: first_image.map(|i| i.url.clone()).unwrap_or_default(),
            image_alt: first_image
                .and_then(|i| i.alt.clone())
                .unwrap_or_else(|| product.title.clone()),
            has_image: first_image.is_some(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImageView {
    pub url: String,
    pub alt: String,
}

#[derive(Debug, Clone)]
pub struct SpecView {
    pub label: String,
    pub value: String,
}

/// Full product view for the detail page.
#[derive(Debug, Clone)]
pub struct ProductDetailView {
    pub title: String,
    pub category_name: String,
    pub category_slug: String,
    pub has_category: bool,
    pub price_display: String,
    pub has_price: bool,
    pub mrp_display: String,
    pub show_mrp: bool,
    pub discount_display: String,
    pub show_discount: bool,
    pub gst_note: String,
    pub description: String,
    pub main_image: ImageView,
    pub has_images: bool,
    pub images: Vec<ImageView>,
    pub has_gallery: bool,
    pub specifications: Vec<SpecView>,
    pub has_specifications: bool,
}

impl ProductDetailView {
    pub fn build(product: &Product, category: Option<&Category>) -> Self {
        // The strike-through MRP and discount badge only make sense
        // when an actual markdown happened.
        let discounted = product.price.is_some()
            && product
                .discount
                .map(|d| d > rust_decimal::Decimal::ZERO)
                .unwrap_or(false);

        Self {
            title: product.title.clone(),
            category_name: category.map(|c| c.name.clone()).unwrap_or_default(),
            category_slug: category.map(|c| c.slug.clone()).unwrap_or_default(),
            has_category: category.is_some(),
            price_display: product
                .price
                .map(|p| format!("₹{}", utils::format_inr(p)))
                .unwrap_or_default(),
            has_price: product.price.is_some(),
            mrp_display: product
                .mrp
                .map(|m| format!("₹{}", utils::format_inr(m)))
                .unwrap_or_default(),
            show_mrp: discounted && product.mrp.is_some(),
            discount_display: product
                .discount
                .map(|d| format!("{d}% off"))
                .unwrap_or_default(),
            show_discount: discounted,
            gst_note: format!("Incl. {}% GST", product.gst_rate),
            description: product.description.clone(),
            main_image: ImageView {
                url: product
                    .images
                    .first()
                    .map(|i| i.url.clone())
                    .unwrap_or_default(),
                alt: product
                    .images
                    .first()
                    .and_then(|i| i.alt.clone())
                    .unwrap_or_else(|| product.title.clone()),
            },
            has_images: !product.images.is_empty(),
            has_gallery: product.images.len() > 1,
            images: product
                .images
                .iter()
                .map(|i| ImageView {
                    url: i.url.clone(),
                    alt: i.alt.clone().unwrap_or_else(|| product.title.clone()),
                })
                .collect(),
            has_specifications: !product.specifications.is_empty(),
            specifications: product
                .specifications
                .iter()
                .map(|s| SpecView {
                    label: s.label.clone(),
                    value: s.value.clone(),
                })
                .collect(),
        }
    }
}

/// Category chip on the catalog page filter row.
#[derive(Debug, Clone)]
pub struct CategoryChipView {
    pub name: String,
    pub slug: String,
    pub active: bool,
}

pub fn category_chips(categories: &[Category], selected: Option<&str>) -> Vec<CategoryChipView> {
    categories
        .iter()
        .map(|c| CategoryChipView {
            name: c.name.clone(),
            slug: c.slug.clone(),
            active: selected == Some(c.slug.as_str()),
        })
        .collect()
}

/// Category card on the home page strip.
#[derive(Debug, Clone)]
pub struct CategoryCardView {
    pub name: String,
    pub slug: String,
    pub image_url: String,
    pub has_image: bool,
}

impl CategoryCardView {
    pub fn build(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            slug: category.slug.clone(),
            image_url: category.image_url.clone().unwrap_or_default(),
            has_image: category.image_url.is_some(),
        }
    }
}

/// Video card with a thumbnail derived from the watch URL.
#[derive(Debug, Clone)]
pub struct VideoCardView {
    pub title: String,
    pub url: String,
    pub description: String,
    pub has_description: bool,
    pub thumbnail_url: String,
    pub has_thumbnail: bool,
}

impl VideoCardView {
    pub fn build(video: &Video) -> Self {
        let thumbnail = utils::youtube_id(&video.url).map(|id| utils::youtube_thumbnail(&id));

        Self {
            title: video.title.clone(),
            url: video.url.clone(),
            description: video.description.clone().unwrap_or_default(),
            has_description: video.description.is_some(),
            has_thumbnail: thumbnail.is_some(),
            thumbnail_url: thumbnail.unwrap_or_default(),
        }
    }
}

/// Numbered pagination link on the catalog page.
#[derive(Debug, Clone)]
pub struct PageLinkView {
    pub number: u64,
    pub href: String,
    pub current: bool,
}

/// Enumerate pagination links, carrying the category filter through.
/// A single page needs no links at all.
pub fn page_links(current: u64, total_pages: u64, category: Option<&str>) -> Vec<PageLinkView> {
    if total_pages <= 1 {
        return Vec::new();
    }
    (1..=total_pages)
        .map(|number| {
            let href = match category {
                Some(slug) => format!("/products?category={slug}&page={number}"),
                None => format!("/products?page={number}"),
            };
            PageLinkView {
                number,
                href,
                current: number == current,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::company::models::{ContactInfo, SocialLink};
    use crate::modules::products::models::ProductDraft;
    use uuid::Uuid;

    fn product(mrp: Option<&str>, discount: Option<&str>) -> Product {
        let draft: ProductDraft = serde_json::from_value(serde_json::json!({
            "title": "HT Panel",
            "category_id": Uuid::now_v7(),
            "description": "11kV switchboard",
            "mrp": mrp,
            "discount": discount,
        }))
        .unwrap();
        draft.into_document(Utc::now()).unwrap()
    }

    #[test]
    fn test_chrome_from_default_settings() {
        let chrome = SiteChrome::from_settings(&CompanySettings::default());
        assert_eq!(chrome.site_title, "Demo Electricals");
        assert!(!chrome.has_phone);
        assert!(!chrome.has_whatsapp);
        assert!(chrome.social_links.is_empty());
    }

    #[test]
    fn test_chrome_contact_block() {
        let settings = CompanySettings {
            contact: ContactInfo {
                phone: Some("+91 98765-43210, +91 11 2345 6789".to_string()),
                email: Some("sales@example.com".to_string()),
                address: None,
            },
            social_links: vec![SocialLink {
                platform: SocialPlatform::YouTube,
                url: "https://youtube.com/@demo".to_string(),
            }],
            ..Default::default()
        };
        let chrome = SiteChrome::from_settings(&settings);
        assert_eq!(chrome.phones.len(), 2);
        assert_eq!(chrome.call_href, "tel:+91 98765-43210");
        assert_eq!(chrome.whatsapp_url, "https://wa.me/919876543210");
        assert_eq!(chrome.social_links[0].platform, "YouTube");
    }

    #[test]
    fn test_product_card_price_display() {
        let card = ProductCardView::build(&product(Some("1000"), Some("10")), &[]);
        assert!(card.has_price);
        assert_eq!(card.price_display, "₹1,062.00");
        assert!(!card.has_category);
        assert!(!card.has_image);
    }

    #[test]
    fn test_product_card_without_price() {
        let card = ProductCardView::build(&product(None, None), &[]);
        assert!(!card.has_price);
        assert_eq!(card.price_display, "");
    }

    #[test]
    fn test_detail_view_discount_badges() {
        let view = ProductDetailView::build(&product(Some("1000"), Some("10")), None);
        assert!(view.show_mrp);
        assert_eq!(view.mrp_display, "₹1,000.00");
        assert_eq!(view.discount_display, "10% off");
        assert_eq!(view.gst_note, "Incl. 18% GST");

        let undiscounted = ProductDetailView::build(&product(Some("1000"), None), None);
        assert!(!undiscounted.show_mrp);
        assert!(!undiscounted.show_discount);
        assert!(undiscounted.has_price);
    }

    #[test]
    fn test_video_card_thumbnail() {
        let video = Video {
            id: Uuid::now_v7(),
            title: "Factory tour".to_string(),
            url: "https://youtu.be/dQw4w9WgXcQ".to_string(),
            description: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let card = VideoCardView::build(&video);
        assert!(card.has_thumbnail);
        assert_eq!(
            card.thumbnail_url,
            "https://img.youtube.com/vi/dQw4w9WgXcQ/hqdefault.jpg"
        );
    }

    #[test]
    fn test_page_links() {
        assert!(page_links(1, 1, None).is_empty());

        let links = page_links(2, 3, Some("panels"));
        assert_eq!(links.len(), 3);
        assert_eq!(links[0].href, "/products?category=panels&page=1");
        assert!(links[1].current);
        assert!(!links[2].current);

        let plain = page_links(1, 2, None);
        assert_eq!(plain[1].href, "/products?page=2");
    }
}
