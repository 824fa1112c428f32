//! Benchmarks for validation and wire transforms.
//!
//! Run with: `cargo bench`
//!
//! Both run once per form on every batch submit, so they should stay well
//! under a millisecond even for forms with the maximum of 20 skills.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use expforms::transform::{experience_to_response, form_to_experience, response_to_form};
use expforms::{
    ExperienceCategory, ExperienceFormData, FormInstance, FormValues, ProfessionalFormData,
    RecordId,
};

fn full_professional() -> ExperienceFormData {
    let skills: Vec<String> = (0..20).map(|i| format!("skill-{}", i)).collect();
    let skills_description: BTreeMap<String, String> = skills
        .iter()
        .step_by(2)
        .map(|s| (s.clone(), format!("Used {} daily", s)))
        .collect();
    ExperienceFormData::Professional(ProfessionalFormData {
        title: "Staff Engineer".into(),
        company: "Acme Corp".into(),
        location: Some("Remote".into()),
        start_date: NaiveDate::from_ymd_opt(2018, 4, 1).unwrap(),
        end_date: Some(NaiveDate::from_ymd_opt(2023, 3, 31).unwrap()),
        is_current: false,
        description: "Led the platform group across storage and networking.".repeat(4),
        skills,
        skills_description,
    })
}

/// Benchmark validating a fully populated form.
fn bench_validate(c: &mut Criterion) {
    let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
    let values = FormValues::from(&full_professional());

    c.bench_function("validate_professional_20_skills", |b| {
        b.iter(|| {
            let mut form = FormInstance::with_values(values.clone());
            black_box(form.validate_at(today))
        });
    });

    c.bench_function("validate_empty_project", |b| {
        b.iter(|| {
            let mut form = FormInstance::new(ExperienceCategory::Project);
            black_box(form.validate_at(today))
        });
    });
}

/// Benchmark the outbound and inbound transforms.
fn bench_transform(c: &mut Criterion) {
    let data = full_professional();
    let response = experience_to_response(RecordId::new("exp_1"), &form_to_experience(&data));

    c.bench_function("form_to_experience", |b| {
        b.iter(|| black_box(form_to_experience(black_box(&data))));
    });

    c.bench_function("response_to_form", |b| {
        b.iter(|| black_box(response_to_form(black_box(&response)).unwrap()));
    });
}

criterion_group!(benches, bench_validate, bench_transform);
criterion_main!(benches);
