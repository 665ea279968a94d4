use ihesoap::registry::{
    AdhocQueryResponse, Document, DocumentResponse, RegistryError, RegistryErrorList,
    RetrieveDocumentSetResponse, status,
};
use ihesoap::{
    AdhocQueryBody, Attachment, BodyContent, BodyKind, NamespaceTable, QueryResponseBody,
    RequestEnvelope, RequestHeader, ResponseBody, ResponseEnvelope, RetrieveDocumentBody,
    SoapBody, Transaction,
};

const REGISTRY_URL: &str = "https://registry.example/xds/iti18";

#[test]
fn retrieve_success_reports_no_error() {
    let mut body = RetrieveDocumentBody::default();
    body.set_content(RetrieveDocumentSetResponse::new(status::SUCCESS));

    assert!(!body.has_error());
    assert_eq!(body.error_from_fault(), None);
}

#[test]
fn retrieve_failure_surfaces_status() {
    let mut response = RetrieveDocumentSetResponse::new(status::FAILURE);
    response.registry_response.registry_error_list = Some(RegistryErrorList {
        highest_severity: Some(status::SEVERITY_ERROR.to_string()),
        errors: vec![RegistryError::new(
            "XDSMissingDocument",
            "Document 1.2.3.99 not found",
        )],
    });

    let mut envelope = ResponseEnvelope::for_kind(BodyKind::Retrieve);
    envelope
        .body_mut()
        .set_content(BodyContent::Retrieve(response));

    assert!(envelope.body().has_error());
    let fault = envelope.body().error_from_fault().unwrap();
    assert_eq!(fault.status, status::FAILURE);
    assert_eq!(fault.errors.len(), 1);
    assert_eq!(fault.errors[0].error_code, "XDSMissingDocument");
}

#[test]
fn partial_success_is_not_a_failure() {
    let mut body = RetrieveDocumentBody::default();
    body.set_content(RetrieveDocumentSetResponse::new(status::PARTIAL_SUCCESS));

    assert!(!body.has_error());
}

#[test]
fn query_body_never_reports_error() {
    let mut body = QueryResponseBody::default();
    body.set_content(AdhocQueryResponse::new(status::FAILURE));

    assert!(!body.has_error());
}

#[test]
fn request_envelope_header_survives_round_trip() {
    let header = RequestHeader::new(Transaction::RegistryStoredQuery.action(), REGISTRY_URL)
        .with_message_id("urn:uuid:6b1e4f3c-8a52-4c1e-b1a4-3f2a9c7d5e10");
    let envelope = RequestEnvelope::for_body(
        &NamespaceTable::default(),
        header.clone(),
        AdhocQueryBody::default(),
    );

    let xml = envelope.to_xml().unwrap();
    let parsed = RequestEnvelope::<AdhocQueryBody>::from_xml(&xml).unwrap();

    assert_eq!(parsed.header(), &header);
    assert_eq!(
        parsed.header().action.value,
        "urn:ihe:iti:2007:RegistryStoredQuery"
    );
    assert_eq!(parsed.header().to, REGISTRY_URL);
    assert!(parsed.body().content().is_none());
}

#[test]
fn response_from_foreign_prefixes() {
    let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<s:Envelope xmlns:s="http://www.w3.org/2003/05/soap-envelope" xmlns:a="http://www.w3.org/2005/08/addressing">
  <s:Header>
    <a:Action s:mustUnderstand="1">urn:ihe:iti:2007:RetrieveDocumentSetResponse</a:Action>
    <a:RelatesTo>urn:uuid:6b1e4f3c-8a52-4c1e-b1a4-3f2a9c7d5e10</a:RelatesTo>
  </s:Header>
  <s:Body>
    <RetrieveDocumentSetResponse xmlns="urn:ihe:iti:xds-b:2007">
      <RegistryResponse xmlns="urn:oasis:names:tc:ebxml-regrep:xsd:rs:3.0" status="urn:oasis:names:tc:ebxml-regrep:ResponseStatusType:Failure">
        <RegistryErrorList highestSeverity="urn:oasis:names:tc:ebxml-regrep:ErrorSeverityType:Error">
          <RegistryError errorCode="XDSDocumentUniqueIdError" codeContext="Unknown document" severity="urn:oasis:names:tc:ebxml-regrep:ErrorSeverityType:Error"/>
        </RegistryErrorList>
      </RegistryResponse>
    </RetrieveDocumentSetResponse>
  </s:Body>
</s:Envelope>"#;

    let envelope = ResponseEnvelope::from_xml(xml, BodyKind::Retrieve).unwrap();

    let header = envelope.header().unwrap();
    assert_eq!(
        header.action(),
        Some("urn:ihe:iti:2007:RetrieveDocumentSetResponse")
    );
    assert_eq!(
        header.relates_to.as_deref(),
        Some("urn:uuid:6b1e4f3c-8a52-4c1e-b1a4-3f2a9c7d5e10")
    );
    assert!(envelope.attachments().is_empty());

    let fault = envelope.body().error_from_fault().unwrap();
    assert_eq!(fault.status, status::FAILURE);
    assert_eq!(fault.errors[0].code_context, "Unknown document");
}

#[test]
fn same_document_decoded_by_transaction_kind() {
    let mut envelope = ResponseEnvelope::new(ResponseBody::Query(QueryResponseBody::new(
        AdhocQueryResponse::new(status::FAILURE),
    )));
    envelope.add_attachment(Attachment::new("unused@example", b"x".to_vec()));
    let xml = envelope.to_xml().unwrap();

    let as_query = ResponseEnvelope::from_xml(&xml, BodyKind::Query).unwrap();
    assert_eq!(as_query.body().kind(), BodyKind::Query);
    assert!(!as_query.body().has_error());
    assert_eq!(
        as_query
            .body()
            .as_query()
            .and_then(|b| b.content())
            .map(|r| r.status.as_str()),
        Some(status::FAILURE)
    );
    assert_eq!(as_query.attachments().len(), 1);

    let as_generic = ResponseEnvelope::from_xml(&xml, BodyKind::Generic).unwrap();
    let element = as_generic
        .body()
        .as_generic()
        .and_then(|b| b.content())
        .unwrap();
    assert_eq!(element.name, "AdhocQueryResponse");
    assert!(!as_generic.body().has_error());
}

#[test]
fn attached_document_travels_with_envelope() {
    let response = RetrieveDocumentSetResponse::new(status::SUCCESS).with_document(
        DocumentResponse {
            repository_unique_id: Some("1.3.6.1.4.1.21367.2010.1.2.1125".to_string()),
            document_unique_id: Some("1.3.6.1.4.1.21367.2010.1.2.1125.99".to_string()),
            mime_type: "text/xml".to_string(),
            document: Some(Document::attached("1.urn:uuid:a1@apache.org")),
            ..DocumentResponse::default()
        },
    );
    let mut envelope =
        ResponseEnvelope::new(ResponseBody::Retrieve(RetrieveDocumentBody::new(response)));
    envelope.add_attachment(Attachment::new(
        "1.urn:uuid:a1@apache.org",
        b"<ClinicalDocument/>".to_vec(),
    ));

    let xml = envelope.to_xml().unwrap();
    let mut parsed = ResponseEnvelope::from_xml(&xml, BodyKind::Retrieve).unwrap();

    assert!(!parsed.body().has_error());
    assert_eq!(
        parsed.attachment("cid:1.urn:uuid:a1@apache.org").map(|a| a.data()),
        Some(&b"<ClinicalDocument/>"[..])
    );
    assert_eq!(parsed.take_document(0), Some(b"<ClinicalDocument/>".to_vec()));
    assert!(parsed.attachments().is_empty());
}

#[test]
fn partial_success_with_several_documents() {
    let xml = r#"<s:Envelope xmlns:s="http://www.w3.org/2003/05/soap-envelope">
  <s:Body>
    <xdsb:RetrieveDocumentSetResponse xmlns:xdsb="urn:ihe:iti:xds-b:2007" xmlns:rs="urn:oasis:names:tc:ebxml-regrep:xsd:rs:3.0">
      <rs:RegistryResponse status="urn:oasis:names:tc:ebxml-regrep:ResponseStatusType:PartialSuccess">
        <rs:RegistryErrorList>
          <rs:RegistryError errorCode="XDSMissingDocument" codeContext="1.2.3.3 not found"/>
        </rs:RegistryErrorList>
      </rs:RegistryResponse>
      <xdsb:DocumentResponse>
        <xdsb:RepositoryUniqueId>1.2.3</xdsb:RepositoryUniqueId>
        <xdsb:DocumentUniqueId>1.2.3.1</xdsb:DocumentUniqueId>
        <xdsb:mimeType>text/plain</xdsb:mimeType>
        <xdsb:Document>SGVsbG8=</xdsb:Document>
      </xdsb:DocumentResponse>
      <xdsb:DocumentResponse>
        <xdsb:RepositoryUniqueId>1.2.3</xdsb:RepositoryUniqueId>
        <xdsb:DocumentUniqueId>1.2.3.2</xdsb:DocumentUniqueId>
        <xdsb:mimeType>application/pdf</xdsb:mimeType>
        <xdsb:Document><xop:Include xmlns:xop="http://www.w3.org/2004/08/xop/include" href="cid:doc2@repository.example"/></xdsb:Document>
      </xdsb:DocumentResponse>
    </xdsb:RetrieveDocumentSetResponse>
  </s:Body>
  <attachments>
    <ContentID>doc2@repository.example</ContentID>
    <Data>JVBERi0xLjc=</Data>
  </attachments>
</s:Envelope>"#;

    let mut envelope = ResponseEnvelope::from_xml(xml, BodyKind::Retrieve).unwrap();

    assert!(!envelope.body().has_error());
    assert_eq!(envelope.document_count(), 2);
    assert_eq!(envelope.document_bytes(0), Some(&b"Hello"[..]));
    assert_eq!(envelope.document_bytes(1), Some(&b"%PDF-1.7"[..]));
    assert_eq!(envelope.document_bytes(2), None);

    assert_eq!(envelope.take_document(1), Some(b"%PDF-1.7".to_vec()));
    assert!(envelope.attachments().is_empty());
}

#[test]
fn failure_with_several_documents_still_reports_error() {
    let mut response = RetrieveDocumentSetResponse::new(status::FAILURE);
    for id in ["1.2.3.1", "1.2.3.2"] {
        response = response.with_document(DocumentResponse {
            document_unique_id: Some(id.to_string()),
            mime_type: "text/plain".to_string(),
            document: Some(Document::inline(id.as_bytes().to_vec())),
            ..DocumentResponse::default()
        });
    }
    let envelope =
        ResponseEnvelope::new(ResponseBody::Retrieve(RetrieveDocumentBody::new(response)));

    let parsed = ResponseEnvelope::from_xml(&envelope.to_xml().unwrap(), BodyKind::Retrieve)
        .unwrap();

    assert_eq!(parsed.document_count(), 2);
    assert_eq!(
        parsed.body().error_from_fault().map(|f| f.status),
        Some(status::FAILURE.to_string())
    );
}

#[test]
fn stored_query_with_interleaved_results() {
    let xml = r#"<s:Envelope xmlns:s="http://www.w3.org/2003/05/soap-envelope">
  <s:Body>
    <query:AdhocQueryResponse xmlns:query="urn:oasis:names:tc:ebxml-regrep:xsd:query:3.0"
        xmlns:rim="urn:oasis:names:tc:ebxml-regrep:xsd:rim:3.0"
        status="urn:oasis:names:tc:ebxml-regrep:ResponseStatusType:Success">
      <rim:RegistryObjectList>
        <rim:ObjectRef id="urn:uuid:1"/>
        <rim:Message>hi</rim:Message>
        <rim:ObjectRef id="urn:uuid:2"/>
      </rim:RegistryObjectList>
    </query:AdhocQueryResponse>
  </s:Body>
</s:Envelope>"#;

    let envelope = ResponseEnvelope::from_xml(xml, BodyKind::Query).unwrap();
    let response = envelope.body().as_query().and_then(|b| b.content()).unwrap();

    assert_eq!(response.object_refs().len(), 2);
    assert_eq!(response.registry_object_list.messages, vec!["hi"]);
}
