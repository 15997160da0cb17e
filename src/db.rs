pub mod company_repo;
pub use company_repo::CompanyRepository;
pub mod review_repo;
pub use review_repo::ReviewRepository;
