pub mod company;
pub mod response;
pub mod review;
