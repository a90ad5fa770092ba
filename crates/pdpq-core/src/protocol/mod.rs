//! Protocol value types exchanged with a policy decision authority.
//!
//! - `status`: status code taxonomy, status chains, and error formatting.
//! - `descriptor`: local party and authority descriptors.
//! - `query`: outbound authorization decision queries.
//! - `response`: decoded responses, assertions, and decision statements.
//!
//! Every value here is immutable once built. Decoders construct them fresh per
//! response and the resolver only reads them.

pub mod descriptor;
pub mod query;
pub mod response;
pub mod status;

pub use descriptor::{AuthorityDescriptor, Endpoint, LocalPartyDescriptor};
pub use query::{Action, AuthzDecisionQuery};
pub use response::{Assertion, Decision, DecisionStatement, DecodedResponse};
pub use status::{format_error, Status, StatusCode, UNKNOWN_STATUS};
