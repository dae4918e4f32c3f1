//! SOAP marshaling for the relay user service.
//!
//! This crate covers exactly the three user operations the gateway needs:
//! `createUser`, `list_users` and `get_user`. It is not a general WSDL
//! toolkit.
//!
//! - [`xml`]: a small element tree parsed with `quick-xml`, and a writer that
//!   escapes every text value
//! - [`envelope`]: request/response/fault envelopes for both client and
//!   service side
//!
//! # Example
//!
//! ```
//! use relay_soap::{decode_user_response, encode_user_response, SoapRequest, UserOperation};
//! use relay_core::{User, UserId};
//!
//! let request = SoapRequest::CreateUser {
//!     name: "O'Brien & Co".into(),
//!     email: "ob@example.com".into(),
//! };
//! let wire = request.encode().unwrap();
//! assert_eq!(SoapRequest::decode(&wire).unwrap(), request);
//!
//! let user = User::new(UserId::new(1), "O'Brien & Co", "ob@example.com");
//! let reply = encode_user_response(UserOperation::CreateUser, &user).unwrap();
//! assert_eq!(decode_user_response(&reply).unwrap(), user);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod envelope;
pub mod error;
pub mod xml;

pub use envelope::{
    decode_user_list_response, decode_user_response, encode_user_list_response,
    encode_user_response, SoapFault, SoapRequest, UserOperation, SERVICE_NS, SOAP_CONTENT_TYPE,
    SOAP_ENV_NS,
};
pub use error::{Result, SoapError};
