pub mod categories;
pub mod dto;
pub mod error;
pub mod interests;
pub mod language;
pub mod pagination;
pub mod selection;
pub mod service;
pub mod trending;


pub use categories::CategoryLookup;
pub use dto::{FeedQuery, FeedResponse, PersonalizationResponse};
pub use error::FeedServiceError;
pub use interests::{InterestResolver, ProfileInterestResolver, UserIdentity};
pub use pagination::{paginate, PageRequest, PaginationMeta};
pub use selection::{
    CategorySelection, FallbackReason, SelectionMode, SelectionPolicy, SelectionRequest,
};
pub use service::{FeedService, FeedServiceApi};
