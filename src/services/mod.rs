mod inquiries;
mod listings;

pub use inquiries::*;
pub use listings::*;
