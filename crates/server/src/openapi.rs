use models::{
    account::{AccountKind, Role, TeamMemberCreate, TeamMemberUpdate, TeamMemberView},
    booking::{Booking, BookingCreate, BookingStatus, BookingType, BookingUpdate},
    cab_booking::{CabBooking, CabBookingCreate, CabBookingUpdate, TripType},
    contact::{ContactCreate, ContactInquiry, ContactUpdate, InquiryStatus},
    gallery::{GalleryImage, GalleryImageUpdate},
    package::{ItineraryDay, Package, PackageCreate, PackageStatus, PackageUpdate},
    popup::{Popup, PopupCreate, PopupType, PopupUpdate},
    site_settings::{
        BusinessStats, CompanyInfo, ContactInfo, HeroSection, MapSettings, SeoSettings, SiteSettings, SiteSettingsUpdate,
        SocialMedia,
    },
    stats::{DashboardStats, RecentBooking},
    testimonial::{Testimonial, TestimonialCreate, TestimonialStatus, TestimonialUpdate},
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi, ToSchema,
};

use crate::routes::{
    self,
    auth::{LoginRequest, TokenResponse, VerifyResponse},
    site_settings::ResetResponse,
};

#[derive(ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Multipart body of `POST /api/admin/upload`.
#[derive(ToSchema)]
pub struct UploadForm {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    /// Comma separated.
    pub tags: Option<String>,
}

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::health,
        routes::api_root,
        routes::auth::login,
        routes::auth::verify,
        routes::auth::logout,
        routes::packages::list_public,
        routes::packages::get_public,
        routes::packages::list_all,
        routes::packages::get,
        routes::packages::create,
        routes::packages::update,
        routes::packages::delete,
        routes::bookings::create,
        routes::bookings::list,
        routes::bookings::get,
        routes::bookings::update,
        routes::bookings::delete,
        routes::cab_bookings::create,
        routes::cab_bookings::list,
        routes::cab_bookings::get,
        routes::cab_bookings::update,
        routes::cab_bookings::delete,
        routes::testimonials::list_approved,
        routes::testimonials::create,
        routes::testimonials::list_all,
        routes::testimonials::update,
        routes::testimonials::delete,
        routes::contact::create,
        routes::contact::list,
        routes::contact::update,
        routes::contact::delete,
        routes::gallery::list_active,
        routes::gallery::list_all,
        routes::gallery::upload,
        routes::gallery::update,
        routes::gallery::delete,
        routes::team::list,
        routes::team::get,
        routes::team::create,
        routes::team::update,
        routes::team::delete,
        routes::popups::list_live,
        routes::popups::list_all,
        routes::popups::get,
        routes::popups::create,
        routes::popups::update,
        routes::popups::toggle,
        routes::popups::delete,
        routes::site_settings::get_public,
        routes::site_settings::get,
        routes::site_settings::update,
        routes::site_settings::reset,
        routes::stats::dashboard,
    ),
    components(
        schemas(
            HealthResponse,
            MessageResponse,
            UploadForm,
            LoginRequest,
            TokenResponse,
            VerifyResponse,
            ResetResponse,
            Role,
            AccountKind,
            TeamMemberView,
            TeamMemberCreate,
            TeamMemberUpdate,
            Package,
            PackageStatus,
            ItineraryDay,
            PackageCreate,
            PackageUpdate,
            Booking,
            BookingStatus,
            BookingType,
            BookingCreate,
            BookingUpdate,
            CabBooking,
            TripType,
            CabBookingCreate,
            CabBookingUpdate,
            Testimonial,
            TestimonialStatus,
            TestimonialCreate,
            TestimonialUpdate,
            ContactInquiry,
            InquiryStatus,
            ContactCreate,
            ContactUpdate,
            GalleryImage,
            GalleryImageUpdate,
            Popup,
            PopupType,
            PopupCreate,
            PopupUpdate,
            SiteSettings,
            SiteSettingsUpdate,
            ContactInfo,
            SocialMedia,
            CompanyInfo,
            HeroSection,
            MapSettings,
            SeoSettings,
            BusinessStats,
            DashboardStats,
            RecentBooking,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "packages"),
        (name = "bookings"),
        (name = "cab-bookings"),
        (name = "testimonials"),
        (name = "contact"),
        (name = "gallery"),
        (name = "team"),
        (name = "popups"),
        (name = "site-settings"),
        (name = "stats")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_admin_paths_and_bearer_scheme() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/admin/popups/{id}/toggle"));
        assert!(doc.paths.paths.contains_key("/api/packages"));
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer"));
    }

    #[test]
    fn id_paths_declare_their_path_parameter() {
        let doc = ApiDoc::openapi();
        let mut checked = 0;
        for (path, item) in doc.paths.paths.iter().filter(|(p, _)| p.contains("{id}")) {
            for op in item.operations.values() {
                let params = op.parameters.as_deref().unwrap_or_default();
                assert!(params.iter().any(|p| p.name == "id"), "{path} lacks an id parameter");
                checked += 1;
            }
        }
        assert!(checked >= 23);
    }
}
