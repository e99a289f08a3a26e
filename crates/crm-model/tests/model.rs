//! Tests for crm-model types.

use crm_model::{
    CollectionKind, CustomField, CustomFieldPatch, CustomFieldType, Definition, DefinitionId,
    LeadSource, LeadSourcePatch, QuotationTemplate,
};

#[test]
fn lead_source_patch_from_partial_json() {
    let patch: LeadSourcePatch = serde_json::from_str(r#"{"name":"Partner Network"}"#).unwrap();
    let mut source = LeadSource {
        id: DefinitionId::from_static("referral"),
        name: "Referral".to_string(),
        description: "Word of mouth".to_string(),
        active: true,
    };
    let before = source.clone();
    source.apply(patch);
    assert_eq!(source.name, "Partner Network");
    assert_eq!(source.description, before.description);
    assert_eq!(source.active, before.active);
    assert_eq!(source.id, before.id);
}

#[test]
fn empty_patch_is_identity() {
    let mut field = CustomField {
        id: DefinitionId::from_static("budget"),
        label: "Budget".to_string(),
        field_type: CustomFieldType::Number,
        required: true,
        options: vec![],
    };
    let before = field.clone();
    field.apply(CustomFieldPatch::default());
    assert_eq!(field, before);
}

#[test]
fn definitions_report_their_collection() {
    assert_eq!(LeadSource::KIND, CollectionKind::LeadSources);
    assert_eq!(QuotationTemplate::KIND, CollectionKind::QuotationTemplates);
    assert_eq!(CollectionKind::all().len(), 7);
}

#[test]
fn definition_serializes_with_plain_id() {
    let template = QuotationTemplate {
        id: DefinitionId::from_static("standard"),
        name: "Standard".to_string(),
        description: String::new(),
        body: "Dear {{contact}}".to_string(),
        is_default: true,
    };
    let json = serde_json::to_value(&template).unwrap();
    assert_eq!(json["id"], "standard");
    let round: QuotationTemplate = serde_json::from_value(json).unwrap();
    assert_eq!(round, template);
}

#[test]
fn lead_source_defaults_to_active() {
    let source: LeadSource = serde_json::from_str(r#"{"id":"webinar","name":"Webinar"}"#).unwrap();
    assert!(source.active);
    assert_eq!(source.label(), "Webinar");
}
