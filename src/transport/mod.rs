//! Transport layer: HTTP and wire-format details (serialization/deserialization).

mod form;
mod http;
mod literal;
mod outcome;
mod smsc;
mod smstraffic;

#[cfg(test)]
pub use http::fake;
pub use http::{BoxFuture, HttpResponse, HttpTransport, ReqwestTransport, TransportFailure};
pub use outcome::{TransportError, decode_outcome_json, decode_outcome_mapping, decode_token};
pub use smsc::encode_smsc_send_query;
pub use smstraffic::{encode_smstraffic_auth_form, encode_smstraffic_send_form};
