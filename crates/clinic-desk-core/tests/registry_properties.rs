//! Property tests for search, filtering, pagination and registry mutations.

use clinic_desk_core::models::{Patient, PatientStatus};
use clinic_desk_core::registry::{ListView, Paginator, Query, Registry, RegistryError};
use proptest::prelude::*;

const LAST_NAMES: [&str; 5] = ["Traoré", "Kouamé", "Koné", "Diallo", "Bamba"];
const FIRST_NAMES: [&str; 4] = ["Awa", "Yao", "Issa", "Fatou"];

fn patient_strategy() -> impl Strategy<Value = Patient> {
    (0..LAST_NAMES.len(), 0..FIRST_NAMES.len(), 0u32..10_000, any::<bool>()).prop_map(
        |(last, first, phone, active)| {
            let mut patient = Patient::new(
                LAST_NAMES[last].to_string(),
                FIRST_NAMES[first].to_string(),
                format!("07{:04}", phone),
            );
            patient.status = if active {
                PatientStatus::Active
            } else {
                PatientStatus::Inactive
            };
            patient
        },
    )
}

fn registry_strategy() -> impl Strategy<Value = Registry<Patient>> {
    prop::collection::vec(patient_strategy(), 0..40)
        .prop_map(|patients| Registry::with_seed(patients).unwrap())
}

fn query_strategy() -> impl Strategy<Value = Query> {
    let text = prop::sample::select(vec!["", "  ", "tra", "KO", "awa", "07", "zzz"]);
    let status = prop::sample::select(vec!["all", "active", "inactive"]);
    (text, status).prop_map(|(text, status)| Query::text(text).with_filter("status", status))
}

proptest! {
    #[test]
    fn filter_is_ordered_subsequence(registry in registry_strategy(), query in query_strategy()) {
        let matches = query.apply(registry.records());

        // Every match satisfies the query, every non-match does not
        for record in registry.records() {
            let kept = matches.iter().any(|m| m.id == record.id);
            prop_assert_eq!(kept, query.matches(record));
        }

        // Store order is preserved
        let positions: Vec<usize> = matches
            .iter()
            .map(|m| registry.records().iter().position(|r| r.id == m.id).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn filter_is_idempotent(registry in registry_strategy(), query in query_strategy()) {
        let once: Vec<Patient> = query.apply(registry.records()).into_iter().cloned().collect();
        let twice: Vec<Patient> = query.apply(&once).into_iter().cloned().collect();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn unrestricted_query_matches_all(registry in registry_strategy()) {
        let query = Query::text("   ").with_filter("status", "all");
        prop_assert!(query.is_unrestricted());
        prop_assert_eq!(query.apply(registry.records()).len(), registry.len());
    }

    #[test]
    fn pages_cover_result_exactly(len in 0usize..60, size in 1usize..12) {
        let items: Vec<usize> = (0..len).collect();
        let paginator = Paginator::new(size).unwrap();
        let total_pages = paginator.total_pages(len);
        prop_assert_eq!(total_pages, (len + size - 1) / size);

        let mut seen = Vec::new();
        for number in 1..=total_pages.max(1) {
            let page = paginator.page(&items, number);
            prop_assert!(page.items.len() <= size);
            prop_assert_eq!(page.number, number);
            seen.extend_from_slice(page.items);
        }
        prop_assert_eq!(seen, items);
    }

    #[test]
    fn out_of_range_pages_are_clamped(len in 0usize..60, size in 1usize..12, requested in 0usize..100) {
        let paginator = Paginator::new(size).unwrap();
        let served = paginator.clamp(len, requested);
        prop_assert!(served >= 1);
        prop_assert!(served <= paginator.total_pages(len).max(1));
    }

    #[test]
    fn created_ids_are_unique(patients in prop::collection::vec(patient_strategy(), 1..30)) {
        let mut registry = Registry::new();
        let mut ids = std::collections::HashSet::new();
        for patient in patients {
            let id = registry.insert(patient).unwrap();
            prop_assert!(ids.insert(id));
        }
        prop_assert_eq!(ids.len(), registry.len());
    }

    #[test]
    fn confirmed_delete_is_final(registry in registry_strategy(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!registry.is_empty());
        let mut registry = registry;
        let before = registry.len();
        let id = registry.records()[pick.index(before)].id.clone();

        registry.request_delete(&id).unwrap().confirm(&mut registry).unwrap();

        prop_assert_eq!(registry.len(), before - 1);
        let is_not_found = matches!(registry.get(&id), Err(RegistryError::NotFound { .. }));
        prop_assert!(is_not_found);
        let view = ListView::new(before.max(1)).unwrap();
        prop_assert!(view.render(&registry).records.iter().all(|p| p.id != id));
    }

    #[test]
    fn criteria_changes_reset_to_first_page(
        registry in registry_strategy(),
        requested in 2usize..20,
        text in "[a-z]{0,3}",
    ) {
        let mut view = ListView::new(3).unwrap();

        view.request_page(requested);
        view.search(text.clone());
        prop_assert_eq!(view.current_page(), 1);

        view.request_page(requested);
        view.filter_by("status", "inactive");
        prop_assert_eq!(view.current_page(), 1);

        view.request_page(requested);
        view.clear_filters();
        prop_assert_eq!(view.current_page(), 1);

        view.request_page(requested);
        view.resize(5).unwrap();
        prop_assert_eq!(view.current_page(), 1);

        let page = view.render(&registry);
        prop_assert!(page.records.len() <= 5);
    }
}
