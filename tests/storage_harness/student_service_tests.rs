//! Macro-generated test suite for `StudentService` contract validation.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//! use student_records::storage::InMemoryStudentService;
//!
//! student_service_tests!(InMemoryStudentService::new());
//! ```
//!
//! # Generated Tests
//!
//! ## CRUD
//! - `test_create_assigns_one_on_empty_store`
//! - `test_create_and_get` — all fields round-trip, optional ones included
//! - `test_get_nonexistent`
//! - `test_list_empty` / `test_list_in_id_order`
//! - `test_update_merges_supplied_fields`
//! - `test_update_nonexistent`
//! - `test_delete_existing` / `test_delete_nonexistent`
//!
//! ## Ids
//! - `test_ids_not_reused_after_delete` — deleting the max id does not free it
//!
//! ## Concurrency
//! - `test_concurrent_creates` — parallel creates from spawned tasks

/// Generate a full `StudentService` conformance test suite.
///
/// `$factory` is re-evaluated for each test and must yield a fresh, empty
/// service that is `Clone + 'static`.
#[macro_export]
macro_rules! student_service_tests {
    ($factory:expr) => {
        mod student_service_contract_tests {
            use super::*;
            use student_records::core::record::StudentPatch;
            use student_records::core::service::StudentService;

            // ==================================================================
            // CRUD — Create & Get
            // ==================================================================

            #[tokio::test]
            async fn test_create_assigns_one_on_empty_store() {
                let service = $factory;
                let created = service.create(new_student("Alice")).await.unwrap();
                assert_eq!(created.id, 1);
            }

            #[tokio::test]
            async fn test_create_and_get() {
                let service = $factory;
                let created = service.create(new_student("Alice")).await.unwrap();

                let fetched = service.get(created.id).await.unwrap().unwrap();
                assert_eq!(fetched, created);
                assert_eq!(fetched.name, "Alice");
                assert_eq!(fetched.course, "web-backend-engineering");
                assert_eq!(fetched.branch.as_deref(), Some("computer science"));
                assert_eq!(fetched.phone_number.as_deref(), Some("5551234567"));
            }

            #[tokio::test]
            async fn test_create_without_optional_fields() {
                let service = $factory;
                let mut student = new_student("Bob");
                student.branch = None;
                student.phone_number = None;

                let created = service.create(student).await.unwrap();
                let fetched = service.get(created.id).await.unwrap().unwrap();
                assert!(fetched.branch.is_none());
                assert!(fetched.phone_number.is_none());
            }

            #[tokio::test]
            async fn test_get_nonexistent() {
                let service = $factory;
                assert!(service.get(999).await.unwrap().is_none());
            }

            // ==================================================================
            // CRUD — List
            // ==================================================================

            #[tokio::test]
            async fn test_list_empty() {
                let service = $factory;
                assert!(service.list().await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_list_in_id_order() {
                let service = $factory;
                for name in ["Alice", "Bob", "Carol", "Dave", "Erin"] {
                    service.create(new_student(name)).await.unwrap();
                }

                let listed = service.list().await.unwrap();
                let ids: Vec<i64> = listed.iter().map(|s| s.id).collect();
                assert_eq!(ids, vec![1, 2, 3, 4, 5]);
                assert_eq!(listed[2].name, "Carol");
            }

            // ==================================================================
            // CRUD — Update
            // ==================================================================

            #[tokio::test]
            async fn test_update_merges_supplied_fields() {
                let service = $factory;
                let created = service.create(new_student("Alice")).await.unwrap();

                let patch = StudentPatch {
                    semester: Some(7),
                    location: Some("Irvine".to_string()),
                    ..Default::default()
                };
                let updated = service.update(created.id, patch).await.unwrap().unwrap();
                assert_eq!(updated.id, created.id);
                assert_eq!(updated.semester, 7);
                assert_eq!(updated.location, "Irvine");
                assert_eq!(updated.name, "Alice");
                assert_eq!(updated.email, created.email);

                let fetched = service.get(created.id).await.unwrap().unwrap();
                assert_eq!(fetched, updated);
            }

            #[tokio::test]
            async fn test_update_nonexistent() {
                let service = $factory;
                let patch = StudentPatch {
                    age: Some(30),
                    ..Default::default()
                };
                assert!(service.update(999, patch).await.unwrap().is_none());
            }

            // ==================================================================
            // CRUD — Delete
            // ==================================================================

            #[tokio::test]
            async fn test_delete_existing() {
                let service = $factory;
                let created = service.create(new_student("Alice")).await.unwrap();

                assert!(service.delete(created.id).await.unwrap());
                assert!(service.get(created.id).await.unwrap().is_none());
                assert!(service.list().await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_delete_nonexistent() {
                let service = $factory;
                assert!(!service.delete(999).await.unwrap());
            }

            // ==================================================================
            // Ids
            // ==================================================================

            #[tokio::test]
            async fn test_ids_not_reused_after_delete() {
                let service = $factory;
                service.create(new_student("Alice")).await.unwrap();
                let bob = service.create(new_student("Bob")).await.unwrap();
                assert_eq!(bob.id, 2);

                assert!(service.delete(bob.id).await.unwrap());
                let carol = service.create(new_student("Carol")).await.unwrap();
                assert_eq!(carol.id, 3);
            }

            // ==================================================================
            // Concurrency
            // ==================================================================

            #[tokio::test]
            async fn test_concurrent_creates() {
                let service = $factory;
                let mut handles = Vec::new();
                for i in 0..10 {
                    let service = service.clone();
                    handles.push(tokio::spawn(async move {
                        service
                            .create(new_student(&format!("Student {}", i)))
                            .await
                            .unwrap()
                            .id
                    }));
                }

                let mut ids = Vec::new();
                for handle in handles {
                    ids.push(handle.await.unwrap());
                }
                ids.sort();
                ids.dedup();
                assert_eq!(ids.len(), 10, "every create must get its own id");
                assert_eq!(service.list().await.unwrap().len(), 10);
            }
        }
    };
}
