use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::access::{Actor, Role};
use crate::catalog::tests::{seeded_catalog, MemoryCatalog};
use crate::catalog::{KraRatingEntry, ObjectiveRatingEntry};
use crate::domain::{KraId, ObjectiveId, RatingId, Teacher, TeacherId, UserId};
use crate::records::domain::{CreateRatingRequest, IpcrfRating};
use crate::records::repository::{RatingRepository, TeacherDirectory};
use crate::records::service::RatingService;
use crate::repository::RepositoryError;

#[derive(Default, Clone)]
pub(super) struct MemoryRatings {
    records: Arc<Mutex<BTreeMap<RatingId, IpcrfRating>>>,
}

impl RatingRepository for MemoryRatings {
    fn insert(&self, record: IpcrfRating) -> Result<IpcrfRating, RepositoryError> {
        let mut guard = self.records.lock().expect("ratings mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id, record.clone());
        Ok(record)
    }

    fn update(&self, record: IpcrfRating) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("ratings mutex poisoned");
        if guard.contains_key(&record.id) {
            guard.insert(record.id, record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: RatingId) -> Result<Option<IpcrfRating>, RepositoryError> {
        let guard = self.records.lock().expect("ratings mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn for_teacher(&self, teacher_id: TeacherId) -> Result<Vec<IpcrfRating>, RepositoryError> {
        let guard = self.records.lock().expect("ratings mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| record.teacher_id == teacher_id)
            .cloned()
            .collect())
    }

    fn all(&self) -> Result<Vec<IpcrfRating>, RepositoryError> {
        let guard = self.records.lock().expect("ratings mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

pub(super) struct UnavailableRatings;

impl RatingRepository for UnavailableRatings {
    fn insert(&self, _record: IpcrfRating) -> Result<IpcrfRating, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: IpcrfRating) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: RatingId) -> Result<Option<IpcrfRating>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn for_teacher(&self, _teacher_id: TeacherId) -> Result<Vec<IpcrfRating>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn all(&self) -> Result<Vec<IpcrfRating>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

#[derive(Clone)]
pub(super) struct MemoryTeachers {
    teachers: Vec<Teacher>,
}

impl Default for MemoryTeachers {
    fn default() -> Self {
        let teacher = |id: u64, name: &str| Teacher {
            id: TeacherId(id),
            name: name.to_string(),
            position: Some("Teacher I".to_string()),
        };
        Self {
            teachers: vec![
                teacher(1, "Maria Santos"),
                teacher(2, "Jose Rizal Cruz"),
                teacher(3, "Ana Reyes"),
            ],
        }
    }
}

impl MemoryTeachers {
    pub(super) fn numbered(count: u64) -> Self {
        Self {
            teachers: (1..=count)
                .map(|id| Teacher {
                    id: TeacherId(id),
                    name: format!("Teacher {id:02}"),
                    position: None,
                })
                .collect(),
        }
    }
}

impl TeacherDirectory for MemoryTeachers {
    fn fetch(&self, id: TeacherId) -> Result<Option<Teacher>, RepositoryError> {
        Ok(self.teachers.iter().find(|teacher| teacher.id == id).cloned())
    }

    fn all(&self) -> Result<Vec<Teacher>, RepositoryError> {
        Ok(self.teachers.clone())
    }
}

pub(super) type TestService = RatingService<MemoryRatings, MemoryCatalog, MemoryTeachers>;

pub(super) fn build_service() -> (Arc<TestService>, MemoryRatings) {
    build_service_with(MemoryTeachers::default())
}

pub(super) fn build_service_with(teachers: MemoryTeachers) -> (Arc<TestService>, MemoryRatings) {
    let ratings = MemoryRatings::default();
    let service = RatingService::new(
        Arc::new(ratings.clone()),
        seeded_catalog(),
        Arc::new(teachers),
    );
    (Arc::new(service), ratings)
}

pub(super) fn admin() -> Actor {
    Actor {
        id: UserId(100),
        role: Role::Admin,
    }
}

pub(super) fn super_admin() -> Actor {
    Actor {
        id: UserId(1),
        role: Role::SuperAdmin,
    }
}

/// Ratings against the seeded catalog: objectives 1.1 (60), 1.2 (40) and 2.1 (100).
pub(super) fn entries(r11: u8, r12: u8, r21: u8) -> Vec<KraRatingEntry> {
    vec![
        KraRatingEntry {
            kra_id: KraId(1),
            objectives: vec![
                ObjectiveRatingEntry {
                    objective_id: ObjectiveId(1),
                    rating: Some(f64::from(r11)),
                },
                ObjectiveRatingEntry {
                    objective_id: ObjectiveId(2),
                    rating: Some(f64::from(r12)),
                },
            ],
        },
        KraRatingEntry {
            kra_id: KraId(2),
            objectives: vec![ObjectiveRatingEntry {
                objective_id: ObjectiveId(3),
                rating: Some(f64::from(r21)),
            }],
        },
    ]
}

pub(super) fn create_request(teacher: u64, period: &str) -> CreateRatingRequest {
    CreateRatingRequest {
        teacher_id: Some(TeacherId(teacher)),
        rating_period: Some(period.to_string()),
        kra_details: Some(entries(5, 3, 4)),
        remarks: Some("Consistently prepared".to_string()),
    }
}
