//! anonymise/record.rs
//! The parts of a captured record the anonymiser rewrites.

use std::net::IpAddr;

use crate::anonymise::pseudo::PseudoAnonymiser;
use crate::stream::sink::RecordSink;

/// Access to a record's endpoint addresses and OPT RDATA.
///
/// Records produced by an external payload decoder implement this to be
/// anonymised; fields the record did not capture return `None`.
pub trait EndpointRecord {
    fn query_address_mut(&mut self) -> Option<&mut IpAddr>;

    fn response_address_mut(&mut self) -> Option<&mut IpAddr>;

    fn opt_rdata_mut(&mut self) -> Option<&mut Vec<u8>> {
        None
    }
}

/// Sink adapter that anonymises every record before forwarding it.
#[derive(Debug, Clone)]
pub struct AnonymisingSink<K> {
    anonymiser: PseudoAnonymiser,
    inner: K,
}

impl<K> AnonymisingSink<K> {
    pub fn new(anonymiser: PseudoAnonymiser, inner: K) -> Self {
        Self { anonymiser, inner }
    }

    pub fn into_inner(self) -> K {
        self.inner
    }
}

impl<R, K> RecordSink<R> for AnonymisingSink<K>
where
    R: EndpointRecord,
    K: RecordSink<R>,
{
    type Error = K::Error;

    fn accept(&mut self, mut record: R) -> Result<(), K::Error> {
        self.anonymiser.anonymise_record(&mut record);
        self.inner.accept(record)
    }
}
