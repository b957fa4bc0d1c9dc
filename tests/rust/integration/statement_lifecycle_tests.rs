//! Every gateway path releases the statements it acquires

#[cfg(test)]
mod statement_lifecycle_tests {
    use crate::common::{seeded_store, CountingStore, FRED_QUERY};
    use sqlgate::harness::InjectionGenerator;
    use sqlgate::storage::SqliteStore;
    use sqlgate::{Gateway, QueryCatalog, QueryError};

    fn counting_gateway(store: SqliteStore) -> Gateway<CountingStore> {
        Gateway::new(QueryCatalog::default(), CountingStore::new(store))
    }

    fn assert_balanced(gw: &Gateway<CountingStore>) {
        let store = gw.store();
        assert_eq!(store.prepared, store.finalized);
        assert_eq!(store.open_statements(), 0);
    }

    #[test]
    fn test_success_path_releases_statement() {
        let mut gw = counting_gateway(seeded_store());
        gw.execute(FRED_QUERY, true).unwrap();
        assert_eq!(gw.store().prepared, 1);
        assert_balanced(&gw);
    }

    #[test]
    fn test_rejections_acquire_nothing() {
        let mut gw = counting_gateway(seeded_store());
        let injected = format!("{} or 'hi'='hi';", FRED_QUERY);

        assert_eq!(gw.execute("DROP TABLE USERS", true), Err(QueryError::NotAllowlisted));
        assert_eq!(gw.execute(&injected, true), Err(QueryError::SuspectedInjection));
        assert_eq!(
            gw.execute("SELECT * from USERS WHERE 1=1", true),
            Err(QueryError::TemplateNotFound)
        );

        assert_eq!(gw.store().prepared, 0);
        assert!(gw.store().text_queries.is_empty());
        assert_balanced(&gw);
    }

    #[test]
    fn test_storage_failure_releases_statement() {
        // No USERS table: prepare itself fails, nothing to release
        let mut gw = counting_gateway(SqliteStore::open_in_memory().unwrap());
        assert!(matches!(
            gw.execute(FRED_QUERY, true),
            Err(QueryError::StorageFailure(_))
        ));
        assert_eq!(gw.store().prepared, 0);
        assert_balanced(&gw);
    }

    #[test]
    fn test_fragment_never_reaches_store_as_text() {
        let mut gw = counting_gateway(seeded_store());
        gw.execute(FRED_QUERY, true).unwrap();
        gw.execute("SELECT * FROM USERS", true).unwrap();

        // Only the canonical fixed template went through the text channel
        assert_eq!(gw.store().text_queries, vec!["SELECT * from USERS".to_string()]);
        assert_balanced(&gw);
    }

    #[test]
    fn test_mixed_workload_stays_balanced() {
        let mut gw = counting_gateway(seeded_store());
        let mut generator = InjectionGenerator::seeded(11);

        for i in 0..40 {
            let query = match i % 4 {
                0 => FRED_QUERY.to_string(),
                1 => "SELECT ID, NAME, PASSWORD FROM USERS WHERE NAME='Wilma'".to_string(),
                2 => generator.inject(FRED_QUERY),
                _ => "SELECT ID, NAME, PASSWORD FROM USERS WHERE NAME=''".to_string(),
            };
            let _ = gw.execute(&query, true);
        }

        assert_eq!(gw.store().prepared, 30);
        assert_balanced(&gw);
    }
}
