//! Macro-generated test suite for `CredentialService` contract validation.
//!
//! # Usage
//!
//! ```rust,ignore
//! credential_service_tests!(InMemoryCredentialService::new());
//! ```

/// Generate a `CredentialService` conformance test suite.
///
/// `$factory` is re-evaluated for each test and must yield a fresh, empty
/// service that is `Clone + 'static`.
#[macro_export]
macro_rules! credential_service_tests {
    ($factory:expr) => {
        mod credential_service_contract_tests {
            use super::*;
            use student_records::core::record::Credential;
            use student_records::core::service::CredentialService;

            #[tokio::test]
            async fn test_insert_and_get() {
                let service = $factory;
                assert!(service.insert(Credential::new("alice", "password!")).await.unwrap());

                let stored = service.get("alice").await.unwrap().unwrap();
                assert_eq!(stored.username, "alice");
                assert_eq!(stored.password, "password!");
            }

            #[tokio::test]
            async fn test_get_unknown() {
                let service = $factory;
                assert!(service.get("nobody").await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_contains() {
                let service = $factory;
                assert!(!service.contains("alice").await.unwrap());
                service.insert(Credential::new("alice", "password!")).await.unwrap();
                assert!(service.contains("alice").await.unwrap());
                assert!(!service.contains("bob").await.unwrap());
            }

            #[tokio::test]
            async fn test_duplicate_insert_keeps_first_password() {
                let service = $factory;
                assert!(service.insert(Credential::new("alice", "first!!!")).await.unwrap());
                assert!(!service.insert(Credential::new("alice", "second!!")).await.unwrap());

                let stored = service.get("alice").await.unwrap().unwrap();
                assert_eq!(stored.password, "first!!!");
            }

            #[tokio::test]
            async fn test_concurrent_duplicate_inserts_single_winner() {
                let service = $factory;
                let mut handles = Vec::new();
                for i in 0..8 {
                    let service = service.clone();
                    handles.push(tokio::spawn(async move {
                        service
                            .insert(Credential::new("race", format!("password{}!", i)))
                            .await
                            .unwrap()
                    }));
                }

                let mut winners = 0;
                for handle in handles {
                    if handle.await.unwrap() {
                        winners += 1;
                    }
                }
                assert_eq!(winners, 1);
            }
        }
    };
}
