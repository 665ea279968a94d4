use std::io::BufReader;

use serde::{Deserialize, Serialize};
use tracing::debug;
use xmltree::{Element, XMLNode};

use super::with_declaration;
use crate::attachment::Attachment;
use crate::body::{
    BodyKind, GenericResponseBody, QueryResponseBody, ResponseBody, RetrieveDocumentBody,
};
use crate::errors::SoapError;
use crate::header::ResponseHeader;
use crate::namespaces::ns;
use crate::registry::{AdhocQueryResponse, RetrieveDocumentSetResponse};

/// Enveloppe d'une réponse entrante.
///
/// L'en-tête est optionnel, le corps obligatoire ; les pièces jointes sont
/// transportées à côté de l'arbre XML, dans l'ordre de réception.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEnvelope {
    header: Option<ResponseHeader>,
    body: ResponseBody,
    attachments: Vec<Attachment>,
}

impl ResponseEnvelope {
    pub fn new(body: ResponseBody) -> Self {
        Self {
            header: None,
            body,
            attachments: Vec::new(),
        }
    }

    /// Enveloppe vide dont le corps est de la variante `kind`
    pub fn for_kind(kind: BodyKind) -> Self {
        Self::new(ResponseBody::new(kind))
    }

    pub fn header(&self) -> Option<&ResponseHeader> {
        self.header.as_ref()
    }

    pub fn set_header(&mut self, header: ResponseHeader) {
        self.header = Some(header);
    }

    pub fn body(&self) -> &ResponseBody {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut ResponseBody {
        &mut self.body
    }

    /// Remplace le corps ; l'ancien corps est abandonné
    pub fn set_body(&mut self, body: ResponseBody) {
        self.body = body;
    }

    /// Pièces jointes, dans l'ordre ; vide s'il n'y en a aucune
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    pub fn add_attachment(&mut self, attachment: Attachment) {
        self.attachments.push(attachment);
    }

    /// Retire toutes les pièces jointes et en transfère la propriété
    pub fn take_attachments(&mut self) -> Vec<Attachment> {
        std::mem::take(&mut self.attachments)
    }

    /// Pièce jointe désignée par `reference` (`cid:...` ou identifiant nu)
    pub fn attachment(&self, reference: &str) -> Option<&Attachment> {
        self.attachments
            .iter()
            .find(|a| a.matches_reference(reference))
    }

    pub fn into_parts(self) -> (Option<ResponseHeader>, ResponseBody, Vec<Attachment>) {
        (self.header, self.body, self.attachments)
    }

    /// Nombre de `DocumentResponse` portés par une réponse ITI-43
    pub fn document_count(&self) -> usize {
        self.body
            .as_retrieve()
            .and_then(|b| b.content())
            .map_or(0, |r| r.document_response.len())
    }

    /// Octets du document de rang `index`, en ligne ou via sa référence XOP.
    ///
    /// `None` si le corps n'est pas une réponse ITI-43, si ce rang ne porte
    /// pas de document, ou si la pièce jointe référencée est absente.
    pub fn document_bytes(&self, index: usize) -> Option<&[u8]> {
        let document = self
            .body
            .as_retrieve()?
            .content()?
            .document_response
            .get(index)?
            .document
            .as_ref()?;

        if let Some(inline) = &document.inline {
            return Some(inline.as_bytes());
        }
        self.attachment(document.reference()?).map(Attachment::data)
    }

    /// Comme [`Self::document_bytes`], mais transfère les octets à l'appelant.
    ///
    /// Le document en ligne ou la pièce jointe référencée est retiré de
    /// l'enveloppe.
    pub fn take_document(&mut self, index: usize) -> Option<Vec<u8>> {
        let document = self
            .body
            .as_retrieve_mut()?
            .content_mut()?
            .document_response
            .get_mut(index)?
            .document
            .as_mut()?;

        if let Some(inline) = document.inline.take() {
            return Some(inline.into_bytes());
        }

        let reference = document.reference()?.to_string();
        let position = self
            .attachments
            .iter()
            .position(|a| a.matches_reference(&reference))?;
        Some(self.attachments.remove(position).into_data())
    }

    /// Décode une réponse dans la variante de corps `kind`.
    ///
    /// Le document ne dit pas quelle forme de corps il contient : l'appelant
    /// la connaît d'après la transaction qu'il a invoquée.
    pub fn from_xml(xml: &str, kind: BodyKind) -> Result<Self, SoapError> {
        let root = Element::parse(BufReader::new(xml.as_bytes()))?;
        Self::from_parsed(&root, xml, kind)
    }

    /// Comme [`Self::from_xml`], pour un document dont `root` est l'arbre
    /// déjà analysé.
    pub(crate) fn from_parsed(
        root: &Element,
        xml: &str,
        kind: BodyKind,
    ) -> Result<Self, SoapError> {
        if root.name != "Envelope" {
            return Err(SoapError::MissingEnvelope);
        }
        if root.namespace.as_deref() != Some(ns::SOAP_ENVELOPE) {
            return Err(SoapError::EnvelopeNamespace(
                root.namespace.clone().unwrap_or_default(),
            ));
        }
        let body_element = root.get_child("Body").ok_or(SoapError::MissingBody)?;

        let envelope = match kind {
            BodyKind::Generic => {
                let wire: WireIn<OpaqueBodyIn> = quick_xml::de::from_str(xml)?;
                let body = body_element
                    .children
                    .iter()
                    .find_map(|n| n.as_element())
                    .map(|content| GenericResponseBody::new(content.clone()))
                    .unwrap_or_default();
                Self {
                    header: wire.header,
                    body: ResponseBody::Generic(body),
                    attachments: wire.attachments,
                }
            }
            BodyKind::Query => {
                let wire: WireIn<QueryBodyIn> = quick_xml::de::from_str(xml)?;
                let body = wire
                    .body
                    .response
                    .map(QueryResponseBody::new)
                    .unwrap_or_default();
                Self {
                    header: wire.header,
                    body: ResponseBody::Query(body),
                    attachments: wire.attachments,
                }
            }
            BodyKind::Retrieve => {
                let wire: WireIn<RetrieveBodyIn> = quick_xml::de::from_str(xml)?;
                let body = wire
                    .body
                    .response
                    .map(RetrieveDocumentBody::new)
                    .unwrap_or_default();
                Self {
                    header: wire.header,
                    body: ResponseBody::Retrieve(body),
                    attachments: wire.attachments,
                }
            }
        };

        debug!(
            kind = %kind,
            action = envelope.header().and_then(|h| h.action()).unwrap_or(""),
            attachments = envelope.attachments.len(),
            "Decoded SOAP response"
        );

        Ok(envelope)
    }

    /// Sérialise l'enveloppe en document XML complet
    pub fn to_xml(&self) -> Result<String, SoapError> {
        match &self.body {
            ResponseBody::Query(body) => self.serialize(QueryBodyOut {
                response: body.content(),
            }),
            ResponseBody::Retrieve(body) => self.serialize(RetrieveBodyOut {
                response: body.content(),
            }),
            ResponseBody::Generic(body) => {
                let skeleton = self.serialize(EmptyBodyOut {})?;
                let Some(content) = body.content() else {
                    return Ok(skeleton);
                };

                // Le contenu opaque est greffé dans le Body du squelette
                let mut root = Element::parse(BufReader::new(skeleton.as_bytes()))?;
                let body_element = root
                    .get_mut_child("Body")
                    .ok_or(SoapError::MissingBody)?;
                body_element
                    .children
                    .push(XMLNode::Element(content.clone()));

                let mut buf = Vec::new();
                root.write(&mut buf)?;
                Ok(String::from_utf8(buf)?)
            }
        }
    }

    fn serialize<B: Serialize>(&self, body: B) -> Result<String, SoapError> {
        let wire = WireOut {
            xmlns_env: ns::SOAP_ENVELOPE,
            xmlns_soap: ns::SOAP_ENVELOPE,
            xmlns_xsi: ns::XSI,
            xmlns_wsa: ns::ADDRESSING,
            xmlns_query: ns::QUERY,
            xmlns_rim: ns::RIM,
            xmlns_rs: ns::RS,
            xmlns_xdsb: ns::XDSB,
            xmlns_xop: ns::XOP,
            header: self.header.as_ref(),
            body,
            attachments: &self.attachments,
        };
        Ok(with_declaration(quick_xml::se::to_string(&wire)?))
    }
}

#[derive(Serialize)]
#[serde(rename = "SOAP-ENV:Envelope")]
struct WireOut<'a, B> {
    #[serde(rename = "@xmlns:SOAP-ENV")]
    xmlns_env: &'static str,

    // Préfixe des attributs mustUnderstand de l'en-tête
    #[serde(rename = "@xmlns:soap")]
    xmlns_soap: &'static str,

    #[serde(rename = "@xmlns:xsi")]
    xmlns_xsi: &'static str,

    #[serde(rename = "@xmlns:wsa")]
    xmlns_wsa: &'static str,

    #[serde(rename = "@xmlns:query")]
    xmlns_query: &'static str,

    #[serde(rename = "@xmlns:rim")]
    xmlns_rim: &'static str,

    #[serde(rename = "@xmlns:rs")]
    xmlns_rs: &'static str,

    #[serde(rename = "@xmlns:xdsb")]
    xmlns_xdsb: &'static str,

    #[serde(rename = "@xmlns:xop")]
    xmlns_xop: &'static str,

    #[serde(rename = "SOAP-ENV:Header", skip_serializing_if = "Option::is_none")]
    header: Option<&'a ResponseHeader>,

    #[serde(rename = "SOAP-ENV:Body")]
    body: B,

    #[serde(rename = "attachments")]
    attachments: &'a [Attachment],
}

#[derive(Serialize)]
struct QueryBodyOut<'a> {
    #[serde(rename = "query:AdhocQueryResponse", skip_serializing_if = "Option::is_none")]
    response: Option<&'a AdhocQueryResponse>,
}

#[derive(Serialize)]
struct RetrieveBodyOut<'a> {
    #[serde(
        rename = "xdsb:RetrieveDocumentSetResponse",
        skip_serializing_if = "Option::is_none"
    )]
    response: Option<&'a RetrieveDocumentSetResponse>,
}

#[derive(Serialize)]
struct EmptyBodyOut {}

// Les noms locaux suffisent en lecture : le préfixe choisi par l'émetteur
// n'a pas d'importance.
#[derive(Deserialize)]
struct WireIn<B> {
    #[serde(rename = "Header")]
    header: Option<ResponseHeader>,

    #[serde(rename = "Body")]
    body: B,

    #[serde(rename = "attachments", default)]
    attachments: Vec<Attachment>,
}

#[derive(Deserialize)]
struct QueryBodyIn {
    #[serde(rename = "AdhocQueryResponse")]
    response: Option<AdhocQueryResponse>,
}

#[derive(Deserialize)]
struct RetrieveBodyIn {
    #[serde(rename = "RetrieveDocumentSetResponse")]
    response: Option<RetrieveDocumentSetResponse>,
}

#[derive(Deserialize)]
struct OpaqueBodyIn {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{BodyContent, SoapBody};
    use crate::registry::{Document, DocumentResponse, status};

    fn retrieve_response(document: Document) -> RetrieveDocumentSetResponse {
        RetrieveDocumentSetResponse::new(status::SUCCESS).with_document(DocumentResponse {
            repository_unique_id: Some("1.2.3".to_string()),
            document_unique_id: Some("1.2.3.99".to_string()),
            mime_type: "application/pdf".to_string(),
            document: Some(document),
            ..DocumentResponse::default()
        })
    }

    #[test]
    fn test_attachments_empty_by_default() {
        let envelope = ResponseEnvelope::for_kind(BodyKind::Query);
        assert!(envelope.attachments().is_empty());
        assert!(envelope.header().is_none());
    }

    #[test]
    fn test_set_body_keeps_only_last() {
        let mut envelope = ResponseEnvelope::for_kind(BodyKind::Retrieve);
        envelope
            .body_mut()
            .set_content(BodyContent::Retrieve(RetrieveDocumentSetResponse::new(
                status::FAILURE,
            )));

        envelope.set_body(ResponseBody::new(BodyKind::Query));

        assert_eq!(envelope.body().kind(), BodyKind::Query);
        assert!(!envelope.body().has_error());
        assert!(envelope.body().as_retrieve().is_none());
    }

    #[test]
    fn test_missing_body_is_rejected() {
        let xml = r#"<env:Envelope xmlns:env="http://www.w3.org/2003/05/soap-envelope">
            <env:Header/>
        </env:Envelope>"#;

        let err = ResponseEnvelope::from_xml(xml, BodyKind::Query).unwrap_err();
        assert!(matches!(err, SoapError::MissingBody));
    }

    #[test]
    fn test_not_an_envelope() {
        let err = ResponseEnvelope::from_xml("<Body/>", BodyKind::Generic).unwrap_err();
        assert!(matches!(err, SoapError::MissingEnvelope));
    }

    #[test]
    fn test_envelope_name_must_match_exactly() {
        let xml = r#"<env:NotAnEnvelope xmlns:env="http://www.w3.org/2003/05/soap-envelope">
            <env:Body/>
        </env:NotAnEnvelope>"#;

        let err = ResponseEnvelope::from_xml(xml, BodyKind::Generic).unwrap_err();
        assert!(matches!(err, SoapError::MissingEnvelope));
    }

    #[test]
    fn test_soap11_envelope_is_rejected() {
        let xml = r#"<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
            <s:Body/>
        </s:Envelope>"#;

        let err = ResponseEnvelope::from_xml(xml, BodyKind::Query).unwrap_err();
        assert!(matches!(
            err,
            SoapError::EnvelopeNamespace(ref uri) if uri == "http://schemas.xmlsoap.org/soap/envelope/"
        ));
    }

    #[test]
    fn test_unqualified_envelope_is_rejected() {
        let err = ResponseEnvelope::from_xml("<Envelope><Body/></Envelope>", BodyKind::Generic)
            .unwrap_err();
        assert!(matches!(err, SoapError::EnvelopeNamespace(ref uri) if uri.is_empty()));
    }

    #[test]
    fn test_xop_document_resolved_from_attachments() {
        let mut envelope = ResponseEnvelope::new(ResponseBody::Retrieve(
            RetrieveDocumentBody::new(retrieve_response(Document::attached("doc1@example"))),
        ));
        envelope.add_attachment(Attachment::new("other@example", b"nope".to_vec()));
        envelope.add_attachment(Attachment::new("doc1@example", b"%PDF-1.7".to_vec()));

        assert_eq!(envelope.document_bytes(0), Some(&b"%PDF-1.7"[..]));

        assert_eq!(envelope.take_document(0), Some(b"%PDF-1.7".to_vec()));
        assert_eq!(envelope.attachments().len(), 1);
        assert_eq!(envelope.document_bytes(0), None);
    }

    #[test]
    fn test_inline_document_taken_once() {
        let mut envelope = ResponseEnvelope::new(ResponseBody::Retrieve(
            RetrieveDocumentBody::new(retrieve_response(Document::inline(b"hello".to_vec()))),
        ));

        assert_eq!(envelope.document_bytes(0), Some(&b"hello"[..]));
        assert_eq!(envelope.take_document(0), Some(b"hello".to_vec()));
        assert_eq!(envelope.take_document(0), None);
    }

    #[test]
    fn test_retrieve_round_trip_with_attachments() {
        let mut envelope = ResponseEnvelope::new(ResponseBody::Retrieve(
            RetrieveDocumentBody::new(retrieve_response(Document::attached("doc1@example"))),
        ));
        envelope.set_header(ResponseHeader::reply_to(
            "urn:ihe:iti:2007:RetrieveDocumentSetResponse",
            "urn:uuid:request-1",
        ));
        envelope.add_attachment(Attachment::new("doc1@example", b"%PDF-1.7".to_vec()));

        let xml = envelope.to_xml().unwrap();
        assert!(xml.contains("<SOAP-ENV:Envelope"));
        assert!(xml.contains("<attachments><ContentID>doc1@example</ContentID>"));

        let parsed = ResponseEnvelope::from_xml(&xml, BodyKind::Retrieve).unwrap();
        assert_eq!(parsed, envelope);
        assert_eq!(parsed.document_bytes(0), Some(&b"%PDF-1.7"[..]));
    }

    #[test]
    fn test_generic_round_trip() {
        let content = Element::parse(
            r#"<ping xmlns="urn:example:ping"><seq>7</seq></ping>"#.as_bytes(),
        )
        .unwrap();
        let envelope =
            ResponseEnvelope::new(ResponseBody::Generic(GenericResponseBody::new(content)));

        let xml = envelope.to_xml().unwrap();
        let parsed = ResponseEnvelope::from_xml(&xml, BodyKind::Generic).unwrap();

        let element = parsed.body().as_generic().and_then(|b| b.content()).unwrap();
        assert_eq!(element.name, "ping");
        assert_eq!(
            element.get_child("seq").and_then(|s| s.get_text()).as_deref(),
            Some("7")
        );
        assert!(!parsed.body().has_error());
    }
}
