//! Gateway types module
//!
//! ## Input Types
//! - [`StrictDecimal`]: Format-validated decimal for API input
//! - [`CreateBenefitRequest`], [`UpdateBenefitRequest`], [`TransferApiRequest`]
//!
//! ## Output Types
//! - [`BenefitResponse`]: record with the value rendered as a string
//! - [`ErrorResponse`]: `{status, message, timestamp}`

pub mod money;
pub mod request;
pub mod response;

// Re-export commonly used types at module root
pub use money::{StrictDecimal, format_value};
pub use request::{CreateBenefitRequest, SearchQuery, TransferApiRequest, UpdateBenefitRequest};
pub use response::{BenefitResponse, ErrorResponse};
