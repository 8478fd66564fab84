//! anonymise: keyed pseudo-anonymisation of captured addresses.

pub mod opt;
pub mod pseudo;
pub mod record;

pub use opt::rewrite_opt_rdata;
pub use pseudo::PseudoAnonymiser;
pub use record::{AnonymisingSink, EndpointRecord};
