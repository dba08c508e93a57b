//! Tests for the derived emergency reports
//!
//! All assertions run against a fixed evaluation date so ages are stable.

use chrono::NaiveDate;
use fire_dispatch::store::EntityStore;
use fire_dispatch::{
    AggregationEngine, DispatchError, InMemoryStore, MappingService, MedicalRecord, Person,
};
use std::sync::Arc;

/// Evaluation date every test computes ages against
fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 7, 1).unwrap()
}

fn birth(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Station 3 covers "29 rue de Paris" (John, 10, and Jane, 40, shared phone
/// and email). Station 4 covers "1509 Culver St" (Felicia, adult). Station 1
/// covers "644 Gershwin Cir" (Peter, adult). Station 6 is empty.
fn create_test_registry() -> (Arc<InMemoryStore>, AggregationEngine<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());

    store.save(Person::new("John", "Doe", "29 rue de Paris", "841-874-6512", "doe@email.com"));
    store.save(Person::new("Jane", "Doe", "29 Rue De Paris", "841-874-6512", "doe@email.com"));
    store.save(Person::new("Felicia", "Boyd", "1509 Culver St", "841-874-6544", "fb@email.com"));
    store.save(Person::new("Peter", "Duncan", "644 Gershwin Cir", "841-874-6512", "pd@email.com"));

    store.save(MedicalRecord::new("John", "Doe").with_birth_date(birth(2010, 6, 1)));
    store.save(
        MedicalRecord::new("Jane", "Doe")
            .with_birth_date(birth(1980, 3, 15))
            .with_medications(vec!["aznol:350mg".to_string()])
            .with_allergies(vec!["nillacilan".to_string()]),
    );
    store.save(MedicalRecord::new("Felicia", "Boyd").with_birth_date(birth(1986, 1, 8)));
    store.save(MedicalRecord::new("Peter", "Duncan").with_birth_date(birth(2000, 9, 6)));

    let mapping = MappingService::new(Arc::clone(&store));
    mapping.create_mapping(3, Some("29 rue de Paris"), Some("97451"), Some("Culver")).unwrap();
    mapping.create_mapping(4, Some("1509 Culver St"), Some("97451"), Some("Culver")).unwrap();
    mapping.create_mapping(1, Some("644 Gershwin Cir"), Some("97451"), Some("Culver")).unwrap();
    mapping.create_mapping(6, None, None, None).unwrap();

    let engine = AggregationEngine::new(Arc::clone(&store));
    (store, engine)
}

#[test]
fn test_scenario_d_coverage_counts_children_and_adults() {
    let (_store, engine) = create_test_registry();
    let coverage = engine.coverage_by_station_at(3, as_of()).unwrap();

    assert_eq!(coverage.station_id, 3);
    assert_eq!(coverage.children, 1);
    assert_eq!(coverage.adults, 1);
    assert_eq!(coverage.persons.len(), 2);

    let john = coverage.persons.iter().find(|p| p.first_name == "John").unwrap();
    assert!(john.is_child);
    assert_eq!(john.street, "29 rue de Paris");
    assert_eq!(john.phone, "841-874-6512");
}

#[test]
fn test_coverage_unknown_station() {
    let (_store, engine) = create_test_registry();
    assert!(matches!(
        engine.coverage_by_station_at(99, as_of()).unwrap_err(),
        DispatchError::NotFound(_)
    ));
}

#[test]
fn test_age_boundary_eighteen_is_adult() {
    let store = Arc::new(InMemoryStore::new());
    store.save(Person::new("Ed", "Gray", "1 Oak St", "841-874-0001", "eg@email.com"));
    store.save(MedicalRecord::new("Ed", "Gray").with_birth_date(birth(2002, 7, 1)));
    MappingService::new(Arc::clone(&store))
        .create_mapping(2, Some("1 Oak St"), None, None)
        .unwrap();

    // Born exactly 18 years before the evaluation date: adult, not child.
    let coverage = AggregationEngine::new(store)
        .coverage_by_station_at(2, as_of())
        .unwrap();
    assert_eq!(coverage.children, 0);
    assert_eq!(coverage.adults, 1);
}

#[test]
fn test_scenario_c_children_listed_with_household() {
    let (_store, engine) = create_test_registry();
    let children = engine.children_at_address_at("29 RUE de paris ", as_of()).unwrap();

    assert_eq!(children.len(), 1);
    let john = &children[0];
    assert_eq!(john.first_name, "John");
    assert_eq!(john.age, 10);
    assert_eq!(
        john.household_members,
        vec!["Jane Doe".to_string()],
        "household members must list every other resident and exclude the child"
    );
}

#[test]
fn test_children_at_adults_only_address_is_empty() {
    let (_store, engine) = create_test_registry();
    let children = engine.children_at_address_at("1509 Culver St", as_of()).unwrap();
    assert!(children.is_empty(), "adults-only address yields an empty list, not an error");
}

#[test]
fn test_children_at_unknown_address() {
    let (_store, engine) = create_test_registry();
    assert!(matches!(
        engine.children_at_address_at("9 Phantom Rd", as_of()).unwrap_err(),
        DispatchError::NotFound(_)
    ));
}

#[test]
fn test_scenario_e_shared_phone_number_reported_once() {
    let (_store, engine) = create_test_registry();
    let phones = engine.phone_numbers_by_station(3).unwrap();
    assert_eq!(
        phones,
        vec!["841-874-6512".to_string()],
        "two residents sharing one number must yield it exactly once"
    );
}

#[test]
fn test_persons_at_address_includes_station_and_profiles() {
    let (_store, engine) = create_test_registry();
    let report = engine.persons_at_address_at("29 rue de Paris", as_of()).unwrap();

    assert_eq!(report.station_id, 3);
    assert_eq!(report.residents.len(), 2);
    let jane = report.residents.iter().find(|r| r.first_name == "Jane").unwrap();
    assert_eq!(jane.age, 40);
    assert_eq!(jane.medications, vec!["aznol:350mg".to_string()]);
    assert_eq!(jane.allergies, vec!["nillacilan".to_string()]);
}

#[test]
fn test_persons_at_unattached_address_fails() {
    let (store, engine) = create_test_registry();
    store.save(fire_dispatch::Address::new("12 Orphan Way", "97451", "Culver"));
    let err = engine.persons_at_address_at("12 Orphan Way", as_of()).unwrap_err();
    assert!(
        matches!(err, DispatchError::NotFound(_)),
        "an address with no covering station is an error, got {err:?}"
    );
}

#[test]
fn test_households_by_stations_preserves_input_order() {
    let (_store, engine) = create_test_registry();
    let households = engine.households_by_stations_at(&[4, 3], as_of()).unwrap();

    let streets: Vec<&str> = households.iter().map(|h| h.street.as_str()).collect();
    assert_eq!(streets, vec!["1509 Culver St", "29 rue de Paris"]);

    // An empty station and an unknown station both contribute nothing.
    let with_gaps = engine.households_by_stations_at(&[6, 99, 3], as_of()).unwrap();
    assert_eq!(with_gaps.len(), 1);
    assert_eq!(with_gaps[0].street, "29 rue de Paris");
}

#[test]
fn test_person_info_by_name_is_case_insensitive() {
    let (_store, engine) = create_test_registry();
    let infos = engine.person_info_by_name_at("JOHN", "doe", as_of()).unwrap();

    assert_eq!(infos.len(), 1);
    let info = &infos[0];
    assert_eq!(info.street, "29 rue de Paris");
    assert_eq!(info.zip.as_deref(), Some("97451"));
    assert_eq!(info.city.as_deref(), Some("Culver"));
    assert_eq!(info.age, 10);
    assert_eq!(info.email, "doe@email.com");

    assert!(engine.person_info_by_name_at("Nobody", "Here", as_of()).unwrap().is_empty());
}

#[test]
fn test_emails_by_city_preserves_duplicates() {
    let (_store, engine) = create_test_registry();
    let emails = engine.emails_by_city("CULVER").unwrap();

    // John and Jane share an email; the sweep does not dedupe.
    assert_eq!(emails.len(), 4);
    assert_eq!(emails.iter().filter(|e| e.as_str() == "doe@email.com").count(), 2);

    assert!(engine.emails_by_city("Springfield").unwrap().is_empty());
}

#[test]
fn test_missing_medical_record_fails_age_dependent_reports() {
    let (store, engine) = create_test_registry();
    store.save(Person::new("Ghost", "Resident", "29 rue de Paris", "841-874-0000", "gr@email.com"));

    let err = engine.coverage_by_station_at(3, as_of()).unwrap_err();
    assert!(matches!(err, DispatchError::NotFound(_)));

    // Reports that never read medical data still succeed.
    let phones = engine.phone_numbers_by_station(3).unwrap();
    assert!(phones.contains(&"841-874-0000".to_string()));
}

#[test]
fn test_ages_recomputed_per_call() {
    let (_store, engine) = create_test_registry();
    // John is 10 at the fixed date and 17 seven years later: still a child.
    let later = NaiveDate::from_ymd_opt(2027, 7, 1).unwrap();
    assert_eq!(engine.coverage_by_station_at(3, as_of()).unwrap().children, 1);
    assert_eq!(engine.coverage_by_station_at(3, later).unwrap().children, 1);
    // At 18 the same person counts as an adult.
    let adult_day = NaiveDate::from_ymd_opt(2028, 6, 1).unwrap();
    assert_eq!(engine.coverage_by_station_at(3, adult_day).unwrap().children, 0);
}
