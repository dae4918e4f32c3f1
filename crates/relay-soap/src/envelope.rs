//! SOAP 1.1 envelopes for the user service operations.
//!
//! Both sides of the wire live here: the gateway encodes requests and decodes
//! responses, the user service decodes requests and encodes responses.
//!
//! ```text
//! <soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/"
//!                xmlns:tns="urn:user.service.soap">
//!   <soap:Body>
//!     <tns:createUser>
//!       <tns:name>Ada</tns:name>
//!       <tns:email>ada@example.com</tns:email>
//!     </tns:createUser>
//!   </soap:Body>
//! </soap:Envelope>
//! ```

use relay_core::{User, UserId};

use crate::error::{Result, SoapError};
use crate::xml::{parse, XmlElement, XmlWriter};

/// SOAP 1.1 envelope namespace.
pub const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// Target namespace of the user service.
pub const SERVICE_NS: &str = "urn:user.service.soap";

/// Content type for SOAP 1.1 over HTTP.
pub const SOAP_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// Element name of a repeated user in list responses.
pub const USER_ELEMENT: &str = "User";

const ENVELOPE: &str = "soap:Envelope";
const BODY: &str = "soap:Body";

/// The operations the user service offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserOperation {
    /// Create a user from name and email.
    CreateUser,
    /// List every user.
    ListUsers,
    /// Fetch one user by id.
    GetUser,
}

impl UserOperation {
    /// Body element name on the wire.
    #[must_use]
    pub const fn element_name(self) -> &'static str {
        match self {
            Self::CreateUser => "createUser",
            Self::ListUsers => "list_users",
            Self::GetUser => "get_user",
        }
    }

    fn from_element_name(name: &str) -> Option<Self> {
        match name {
            "createUser" | "create_user" => Some(Self::CreateUser),
            "list_users" => Some(Self::ListUsers),
            "get_user" => Some(Self::GetUser),
            _ => None,
        }
    }
}

/// A decoded or to-be-encoded user service request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoapRequest {
    /// `createUser(name, email)`
    CreateUser {
        /// Display name.
        name: String,
        /// Contact address.
        email: String,
    },
    /// `list_users()`
    ListUsers,
    /// `get_user(user_id)`
    GetUser {
        /// Id to look up.
        user_id: UserId,
    },
}

impl SoapRequest {
    /// The operation this request invokes.
    #[must_use]
    pub const fn operation(&self) -> UserOperation {
        match self {
            Self::CreateUser { .. } => UserOperation::CreateUser,
            Self::ListUsers => UserOperation::ListUsers,
            Self::GetUser { .. } => UserOperation::GetUser,
        }
    }

    /// Encode as a SOAP request envelope; parameters in declared order.
    ///
    /// # Errors
    ///
    /// Returns `SoapError::Xml` if writing fails.
    pub fn encode(&self) -> Result<String> {
        let op = tns(self.operation().element_name());
        let mut w = open_envelope()?;

        match self {
            Self::CreateUser { name, email } => {
                w.start(&op, &[])?
                    .text_element("tns:name", name)?
                    .text_element("tns:email", email)?
                    .end(&op)?;
            }
            Self::ListUsers => {
                w.empty(&op)?;
            }
            Self::GetUser { user_id } => {
                w.start(&op, &[])?
                    .text_element("tns:user_id", &user_id.to_string())?
                    .end(&op)?;
            }
        }

        close_envelope(w)
    }

    /// Decode a request envelope received by the user service.
    ///
    /// # Errors
    ///
    /// Returns an error if the XML is malformed, the body is empty, the
    /// operation is unknown, or a parameter is missing or invalid.
    pub fn decode(xml: &str) -> Result<Self> {
        let body = parse_body(xml)?;
        let call = body
            .first_child()
            .ok_or(SoapError::NotAnEnvelope("empty body".into()))?;

        let operation = UserOperation::from_element_name(&call.name)
            .ok_or_else(|| SoapError::UnknownOperation(call.name.clone()))?;

        match operation {
            UserOperation::CreateUser => Ok(Self::CreateUser {
                name: required_text(call, "name")?.to_string(),
                email: required_text(call, "email")?.to_string(),
            }),
            UserOperation::ListUsers => Ok(Self::ListUsers),
            UserOperation::GetUser => Ok(Self::GetUser {
                user_id: parse_user_id(call)?,
            }),
        }
    }
}

/// A SOAP fault: code plus human-readable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapFault {
    /// `faultcode`, e.g. `soap:Client`.
    pub code: String,
    /// `faultstring`.
    pub message: String,
}

impl SoapFault {
    /// A fault blamed on the caller.
    #[must_use]
    pub fn client(message: impl Into<String>) -> Self {
        Self {
            code: "soap:Client".to_string(),
            message: message.into(),
        }
    }

    /// A fault blamed on the service.
    #[must_use]
    pub fn server(message: impl Into<String>) -> Self {
        Self {
            code: "soap:Server".to_string(),
            message: message.into(),
        }
    }

    /// Whether the fault reports that the requested record does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.message.to_ascii_lowercase().contains("not found")
    }

    /// Encode as a fault response envelope.
    ///
    /// # Errors
    ///
    /// Returns `SoapError::Xml` if writing fails.
    pub fn encode(&self) -> Result<String> {
        let mut w = open_envelope()?;
        w.start("soap:Fault", &[])?
            .text_element("faultcode", &self.code)?
            .text_element("faultstring", &self.message)?
            .end("soap:Fault")?;
        close_envelope(w)
    }
}

/// Encode a single-user response for `createUser` or `get_user`.
///
/// # Errors
///
/// Returns `SoapError::Xml` if writing fails.
pub fn encode_user_response(operation: UserOperation, user: &User) -> Result<String> {
    let response = tns(&format!("{}Response", operation.element_name()));
    let result = tns(&format!("{}Result", operation.element_name()));

    let mut w = open_envelope()?;
    w.start(&response, &[])?.start(&result, &[])?;
    write_user_fields(&mut w, user)?;
    w.end(&result)?.end(&response)?;
    close_envelope(w)
}

/// Encode a `list_users` response with one `User` element per record.
///
/// # Errors
///
/// Returns `SoapError::Xml` if writing fails.
pub fn encode_user_list_response(users: &[User]) -> Result<String> {
    let op = UserOperation::ListUsers.element_name();
    let response = tns(&format!("{op}Response"));
    let result = tns(&format!("{op}Result"));
    let user_element = tns(USER_ELEMENT);

    let mut w = open_envelope()?;
    w.start(&response, &[])?.start(&result, &[])?;
    for user in users {
        w.start(&user_element, &[])?;
        write_user_fields(&mut w, user)?;
        w.end(&user_element)?;
    }
    w.end(&result)?.end(&response)?;
    close_envelope(w)
}

/// Decode a single-user response.
///
/// The user is the first element in the body that has a `user_id` child.
///
/// # Errors
///
/// Returns `SoapError::Fault` if the body carries a fault, and
/// `SoapError::MissingElement("user_id")` if no user record is present.
pub fn decode_user_response(xml: &str) -> Result<User> {
    let body = parse_response_body(xml)?;
    let record = body
        .descendants()
        .into_iter()
        .find(|el| el.child("user_id").is_some())
        .ok_or(SoapError::MissingElement("user_id"))?;
    let user = decode_user(record)?;
    Ok(user)
}

/// Decode a `list_users` response; every `User` element in document order.
///
/// # Errors
///
/// Returns `SoapError::Fault` if the body carries a fault, or a decoding
/// error if any `User` element lacks a valid `user_id`.
pub fn decode_user_list_response(xml: &str) -> Result<Vec<User>> {
    let body = parse_response_body(xml)?;
    let users = body
        .descendants_named(USER_ELEMENT)
        .into_iter()
        .map(decode_user)
        .collect::<Result<Vec<_>>>()?;
    Ok(users)
}

fn decode_user(record: &XmlElement) -> Result<User> {
    let user_id = parse_user_id(record)?;
    let name = record.child_text("name").unwrap_or_default();
    let email = record.child_text("email").unwrap_or_default();
    Ok(User::new(user_id, name, email))
}

fn parse_user_id(parent: &XmlElement) -> Result<UserId> {
    let raw = required_text(parent, "user_id")?;
    raw.parse().map_err(|_| SoapError::InvalidValue {
        element: "user_id",
        value: raw.to_string(),
    })
}

fn required_text<'a>(parent: &'a XmlElement, name: &'static str) -> Result<&'a str> {
    parent
        .child_text(name)
        .ok_or(SoapError::MissingElement(name))
}

fn parse_body(xml: &str) -> Result<XmlElement> {
    let root = parse(xml)?;
    if root.name != "Envelope" {
        return Err(SoapError::NotAnEnvelope(format!(
            "root element is <{}>",
            root.name
        )));
    }
    root.children
        .into_iter()
        .find(|c| c.name == "Body")
        .ok_or(SoapError::NotAnEnvelope("no Body element".into()))
}

fn parse_response_body(xml: &str) -> Result<XmlElement> {
    let body = parse_body(xml)?;
    if let Some(fault) = body.child("Fault") {
        return Err(SoapError::Fault(SoapFault {
            code: fault.child_text("faultcode").unwrap_or_default().to_string(),
            message: fault
                .child_text("faultstring")
                .unwrap_or_default()
                .to_string(),
        }));
    }
    Ok(body)
}

fn write_user_fields(w: &mut XmlWriter, user: &User) -> Result<()> {
    w.text_element("tns:user_id", &user.user_id.to_string())?
        .text_element("tns:name", &user.name)?
        .text_element("tns:email", &user.email)?;
    Ok(())
}

fn tns(local: &str) -> String {
    format!("tns:{local}")
}

fn open_envelope() -> Result<XmlWriter> {
    let mut w = XmlWriter::new()?;
    w.start(ENVELOPE, &[("xmlns:soap", SOAP_ENV_NS), ("xmlns:tns", SERVICE_NS)])?
        .start(BODY, &[])?;
    Ok(w)
}

fn close_envelope(mut w: XmlWriter) -> Result<String> {
    w.end(BODY)?.end(ENVELOPE)?;
    w.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ada() -> User {
        User::new(UserId::new(1), "Ada", "ada@example.com")
    }

    #[test]
    fn create_request_has_ordered_params() {
        let xml = SoapRequest::CreateUser {
            name: "Ada".into(),
            email: "ada@example.com".into(),
        }
        .encode()
        .unwrap();

        assert!(xml.contains(r#"xmlns:tns="urn:user.service.soap""#));
        let name_at = xml.find("<tns:name>").unwrap();
        let email_at = xml.find("<tns:email>").unwrap();
        assert!(name_at < email_at);

        let body = parse_body(&xml).unwrap();
        let call = body.first_child().unwrap();
        assert_eq!(call.name, "createUser");
        assert_eq!(call.child_text("name"), Some("Ada"));
    }

    #[test]
    fn request_roundtrip_through_service_decoder() {
        for request in [
            SoapRequest::CreateUser {
                name: "O'Brien & Co".into(),
                email: "<ob>@co.ie".into(),
            },
            SoapRequest::ListUsers,
            SoapRequest::GetUser {
                user_id: UserId::new(42),
            },
        ] {
            let xml = request.encode().unwrap();
            assert_eq!(SoapRequest::decode(&xml).unwrap(), request);
        }
    }

    #[test]
    fn special_characters_are_escaped_on_the_wire() {
        let xml = SoapRequest::CreateUser {
            name: "O'Brien & Co".into(),
            email: "a\"b<c>".into(),
        }
        .encode()
        .unwrap();
        assert!(!xml.contains("O'Brien & Co"));
        assert!(xml.contains("O&apos;Brien &amp; Co"));
        assert!(xml.contains("a&quot;b&lt;c&gt;"));
    }

    #[test]
    fn decode_accepts_snake_case_create() {
        let xml = r#"<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
            <s:Body><create_user><name>Bo</name><email>bo@x</email></create_user></s:Body>
        </s:Envelope>"#;
        assert_eq!(
            SoapRequest::decode(xml).unwrap(),
            SoapRequest::CreateUser {
                name: "Bo".into(),
                email: "bo@x".into()
            }
        );
    }

    #[test]
    fn decode_rejects_unknown_operation_and_missing_params() {
        let unknown = r#"<Envelope><Body><delete_user/></Body></Envelope>"#;
        assert_eq!(
            SoapRequest::decode(unknown),
            Err(SoapError::UnknownOperation("delete_user".into()))
        );

        let missing = r#"<Envelope><Body><createUser><name>x</name></createUser></Body></Envelope>"#;
        assert_eq!(
            SoapRequest::decode(missing),
            Err(SoapError::MissingElement("email"))
        );

        let bad_id = r#"<Envelope><Body><get_user><user_id>abc</user_id></get_user></Body></Envelope>"#;
        assert!(matches!(
            SoapRequest::decode(bad_id),
            Err(SoapError::InvalidValue { element: "user_id", .. })
        ));
    }

    #[test]
    fn decode_rejects_non_envelope() {
        assert!(matches!(
            SoapRequest::decode("<html><body/></html>"),
            Err(SoapError::NotAnEnvelope(_))
        ));
    }

    #[test]
    fn user_response_roundtrip() {
        let user = User::new(UserId::new(3), "O'Brien & Co", "ob@co.ie");
        let xml = encode_user_response(UserOperation::CreateUser, &user).unwrap();
        assert!(xml.contains("<tns:createUserResponse>"));
        assert_eq!(decode_user_response(&xml).unwrap(), user);
    }

    #[test]
    fn user_response_without_user_id_is_malformed() {
        let xml = r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
            <soap:Body><get_userResponse><get_userResult>
                <name>Ada</name><email>ada@example.com</email>
            </get_userResult></get_userResponse></soap:Body></soap:Envelope>"#;
        assert_eq!(
            decode_user_response(xml),
            Err(SoapError::MissingElement("user_id"))
        );
    }

    #[test]
    fn user_response_with_bad_id_is_invalid() {
        let xml = r#"<Envelope><Body><r><user_id>one</user_id></r></Body></Envelope>"#;
        assert!(matches!(
            decode_user_response(xml),
            Err(SoapError::InvalidValue { .. })
        ));
    }

    #[test]
    fn list_response_preserves_document_order() {
        let users = vec![
            ada(),
            User::new(UserId::new(2), "Bo", "bo@x"),
            User::new(UserId::new(5), "Cy", "cy@x"),
        ];
        let xml = encode_user_list_response(&users).unwrap();
        assert_eq!(decode_user_list_response(&xml).unwrap(), users);
    }

    #[test]
    fn empty_list_response_is_empty() {
        let xml = encode_user_list_response(&[]).unwrap();
        assert!(decode_user_list_response(&xml).unwrap().is_empty());
    }

    #[test]
    fn list_with_broken_member_fails() {
        let xml = r#"<Envelope><Body><list_usersResponse><list_usersResult>
            <User><user_id>1</user_id><name>a</name><email>e</email></User>
            <User><name>no id</name></User>
        </list_usersResult></list_usersResponse></Body></Envelope>"#;
        assert_eq!(
            decode_user_list_response(xml),
            Err(SoapError::MissingElement("user_id"))
        );
    }

    #[test]
    fn fault_roundtrip_and_classification() {
        let fault = SoapFault::client("User with ID 9 not found.");
        let xml = fault.encode().unwrap();
        let err = decode_user_response(&xml).unwrap_err();
        assert_eq!(err, SoapError::Fault(fault.clone()));
        assert!(fault.is_not_found());
        assert!(!SoapFault::server("database exploded").is_not_found());
    }

    #[test]
    fn fault_wins_over_list_decoding() {
        let xml = SoapFault::server("boom").encode().unwrap();
        assert!(matches!(
            decode_user_list_response(&xml),
            Err(SoapError::Fault(_))
        ));
    }

    #[test]
    fn deeply_nested_documents_are_rejected() {
        let depth = 200_000;
        let xml = format!(
            "<Envelope><Body>{}{}</Body></Envelope>",
            "<a>".repeat(depth),
            "</a>".repeat(depth)
        );
        assert!(matches!(
            decode_user_list_response(&xml),
            Err(SoapError::Xml(_))
        ));
        assert!(matches!(decode_user_response(&xml), Err(SoapError::Xml(_))));
        assert!(matches!(SoapRequest::decode(&xml), Err(SoapError::Xml(_))));
    }
}
