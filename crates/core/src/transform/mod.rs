//! Translation between the telephony backend's wire format and the domain records.

mod call;

pub use call::{ApiCallList, ApiCallResponse, CallPatch, CallTransformer, TranscriptMessage};
