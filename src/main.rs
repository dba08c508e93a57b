use anyhow::Context;
use fire_dispatch::store::EntityStore;
use fire_dispatch::{
    AggregationEngine, Identifier, InMemoryStore, MappingService, MedicalRecord, Person,
};
use log::info;
use serde::Deserialize;
use std::sync::Arc;

/// Small bundled dataset in the shape upstream bulk data arrives in.
const SEED: &str = r#"{
  "persons": [
    { "firstName": "John", "lastName": "Boyd", "address": "1509 Culver St", "phone": "841-874-6512", "email": "jaboyd@email.com" },
    { "firstName": "Tenley", "lastName": "Boyd", "address": "1509 Culver St", "phone": "841-874-6512", "email": "tenz@email.com" },
    { "firstName": "Peter", "lastName": "Duncan", "address": "644 Gershwin Cir", "phone": "841-874-6512", "email": "jaboyd@email.com" }
  ],
  "firestations": [
    { "address": "1509 Culver St", "station": 3 },
    { "address": "644 Gershwin Cir", "station": 1 }
  ],
  "medicalrecords": [
    { "firstName": "John", "lastName": "Boyd", "birthdate": "03/06/1984", "medications": ["aznol:350mg", "hydrapermazol:100mg"], "allergies": ["nillacilan"] },
    { "firstName": "Tenley", "lastName": "Boyd", "birthdate": "02/18/2012", "medications": [], "allergies": ["peanut"] },
    { "firstName": "Peter", "lastName": "Duncan", "birthdate": "09/06/2000", "medications": [], "allergies": ["shellfish"] }
  ]
}"#;

#[derive(Debug, Deserialize)]
struct Seed {
    persons: Vec<SeedPerson>,
    firestations: Vec<SeedMapping>,
    medicalrecords: Vec<SeedRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeedPerson {
    first_name: String,
    last_name: String,
    address: String,
    phone: String,
    email: String,
}

#[derive(Debug, Deserialize)]
struct SeedMapping {
    address: String,
    station: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeedRecord {
    first_name: String,
    last_name: String,
    birthdate: String,
    medications: Vec<String>,
    allergies: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seed: Seed = serde_json::from_str(SEED).context("parsing bundled seed data")?;

    let store = Arc::new(InMemoryStore::new());
    for person in seed.persons {
        store.save(Person::new(
            person.first_name,
            person.last_name,
            person.address,
            person.phone,
            person.email,
        ));
    }
    for record in seed.medicalrecords {
        let birth_date = MedicalRecord::parse_birth_date(&record.birthdate)
            .with_context(|| format!("record for {} {}", record.first_name, record.last_name))?;
        store.save(
            MedicalRecord::new(record.first_name, record.last_name)
                .with_birth_date(birth_date)
                .with_medications(record.medications)
                .with_allergies(record.allergies),
        );
    }

    let mapping = MappingService::new(Arc::clone(&store));
    for entry in seed.firestations {
        let outcome = mapping.create_mapping(entry.station, Some(&entry.address), None, None)?;
        info!("{outcome}");
    }

    let detail = mapping.station(&Identifier::parse("3"))?;
    info!(
        "firestation {} covers {} address(es)",
        detail.station.id,
        detail.addresses.len()
    );

    let engine = AggregationEngine::new(Arc::clone(&store));

    let coverage = engine.coverage_by_station(3)?;
    info!(
        "station 3 coverage: {} children, {} adults",
        coverage.children, coverage.adults
    );
    println!("{}", serde_json::to_string_pretty(&coverage)?);

    let children = engine.children_at_address("1509 Culver St")?;
    info!("children at 1509 Culver St: {}", children.len());

    let phones = engine.phone_numbers_by_station(3)?;
    info!("phone numbers for station 3: {phones:?}");

    let household = engine.persons_at_address("1509 Culver St")?;
    println!("{}", serde_json::to_string_pretty(&household)?);

    let households = engine.households_by_stations(&[1, 3])?;
    info!("{} household(s) across stations 1 and 3", households.len());

    let infos = engine.person_info_by_name("john", "boyd")?;
    println!("{}", serde_json::to_string_pretty(&infos)?);

    let emails = engine.emails_by_city("Culver")?;
    info!("emails in Culver: {emails:?}");

    Ok(())
}
