pub mod company_service;
pub use company_service::CompanyService;
pub mod logo_storage;
pub use logo_storage::{LogoStorage, LogoUpload, MAX_LOGO_BYTES};
pub mod rating_service;
pub use rating_service::{RatingAggregator, RatingSummary};
pub mod review_service;
pub use review_service::ReviewService;
