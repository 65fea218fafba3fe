pub mod model;
pub mod requests;
pub mod responses;
pub mod share;
pub mod validation;
