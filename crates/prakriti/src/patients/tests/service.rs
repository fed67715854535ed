use super::common::*;
use crate::constitution::Dosha;
use crate::patients::domain::{ConstitutionFields, PatientId, PatientSubmission};
use crate::patients::repository::{PatientRepository, RepositoryError};
use crate::patients::PatientServiceError;

#[test]
fn register_scores_and_persists_constitution_fields() {
    let (service, repository) = build_service();

    let assessed = service.register(submission()).expect("registration succeeds");

    let expected = ConstitutionFields {
        vata_percentage: 92,
        pitta_percentage: 0,
        kapha_percentage: 8,
        dominant_dosha: Dosha::Vata,
    };
    assert_eq!(assessed.record.constitution, Some(expected));
    assert!(assessed.record.assessed_at.is_some());
    assert_eq!(assessed.record.profile.full_name, "Asha Rao");

    let stored = repository
        .fetch(&assessed.record.id)
        .expect("fetch succeeds")
        .expect("record present");
    assert_eq!(stored, assessed.record);
}

#[test]
fn register_rejects_missing_required_fields() {
    let (service, _) = build_service();

    let mut unnamed = submission();
    unnamed.full_name = Some("   ".to_string());
    assert!(matches!(
        service.register(unnamed),
        Err(PatientServiceError::MissingField("full_name"))
    ));

    let mut ageless = submission();
    ageless.answers.age = None;
    assert!(matches!(
        service.register(ageless),
        Err(PatientServiceError::MissingField("age"))
    ));

    let mut no_gender = submission();
    no_gender.answers.sex = None;
    assert!(matches!(
        service.register(no_gender),
        Err(PatientServiceError::MissingField("gender"))
    ));
}

#[test]
fn register_accepts_blank_questionnaire_with_neutral_split() {
    let (service, _) = build_service();
    let mut submission = PatientSubmission {
        full_name: Some("Blank Intake".to_string()),
        ..PatientSubmission::default()
    };
    submission.answers.age = Some(40);
    submission.answers.sex = Some(crate::constitution::domain::Sex::Other);

    let assessed = service.register(submission).expect("registration succeeds");

    // Age 40 lands in the middle bracket and counts toward Pitta.
    let fields = assessed.record.constitution.expect("fields stored");
    assert_eq!(fields.pitta_percentage, 100);
    assert_eq!(fields.dominant_dosha, Dosha::Pitta);
}

#[test]
fn reassess_overwrites_fields_and_refreshes_profile() {
    let (service, repository) = build_service();
    let registered = service.register(submission()).expect("registered");

    let reassessed = service
        .reassess(&registered.record.id, kapha_answers())
        .expect("reassessment succeeds");

    let fields = reassessed.record.constitution.expect("fields stored");
    assert_eq!(fields.kapha_percentage, 83);
    assert_eq!(fields.pitta_percentage, 17);
    assert_eq!(fields.vata_percentage, 0);
    assert_eq!(fields.dominant_dosha, Dosha::Kapha);
    assert_eq!(reassessed.record.profile.age, Some(55));
    assert_eq!(reassessed.record.created_at, registered.record.created_at);

    let stored = repository
        .fetch(&registered.record.id)
        .expect("fetch succeeds")
        .expect("record present");
    assert_eq!(stored.constitution, Some(fields));
}

#[test]
fn get_propagates_not_found() {
    let (service, _) = build_service();

    match service.get(&PatientId("pat-missing".to_string())) {
        Err(PatientServiceError::Repository(RepositoryError::NotFound)) => {}
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn list_returns_records_in_id_order() {
    let (service, _) = build_service();
    let first = service.register(submission()).expect("first");
    let second = service.register(submission()).expect("second");

    let ids: Vec<PatientId> = service
        .list()
        .expect("list succeeds")
        .into_iter()
        .map(|record| record.id)
        .collect();

    assert_eq!(ids, vec![first.record.id, second.record.id]);
}
