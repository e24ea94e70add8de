use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use ipcrf::catalog::{
    CatalogError, CatalogRepository, CatalogService, Competency, Kra, KraInput,
    NewObjectiveInput, Objective, ObjectiveInput,
};
use ipcrf::domain::{KraId, ObjectiveId, RatingId, SubmissionId, Teacher, TeacherId};
use ipcrf::records::{IpcrfRating, RatingRepository, TeacherDirectory};
use ipcrf::repository::RepositoryError;
use ipcrf::reviews::{SubmissionRepository, TeacherSubmission};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default)]
struct CatalogTables {
    kras: BTreeMap<KraId, Kra>,
    objectives: BTreeMap<ObjectiveId, Objective>,
    competencies: HashMap<ObjectiveId, Competency>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryCatalogRepository {
    tables: Arc<Mutex<CatalogTables>>,
}

impl CatalogRepository for InMemoryCatalogRepository {
    fn insert_kra(&self, kra: Kra) -> Result<Kra, RepositoryError> {
        let mut guard = self.tables.lock().expect("catalog mutex poisoned");
        if guard.kras.contains_key(&kra.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.kras.insert(kra.id, kra.clone());
        Ok(kra)
    }

    fn update_kra(&self, kra: Kra) -> Result<(), RepositoryError> {
        let mut guard = self.tables.lock().expect("catalog mutex poisoned");
        if guard.kras.contains_key(&kra.id) {
            guard.kras.insert(kra.id, kra);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch_kra(&self, id: KraId) -> Result<Option<Kra>, RepositoryError> {
        let guard = self.tables.lock().expect("catalog mutex poisoned");
        Ok(guard.kras.get(&id).cloned())
    }

    fn kras(&self) -> Result<Vec<Kra>, RepositoryError> {
        let guard = self.tables.lock().expect("catalog mutex poisoned");
        Ok(guard.kras.values().cloned().collect())
    }

    fn insert_objective(&self, objective: Objective) -> Result<Objective, RepositoryError> {
        let mut guard = self.tables.lock().expect("catalog mutex poisoned");
        if guard.objectives.contains_key(&objective.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.objectives.insert(objective.id, objective.clone());
        Ok(objective)
    }

    fn update_objective(&self, objective: Objective) -> Result<(), RepositoryError> {
        let mut guard = self.tables.lock().expect("catalog mutex poisoned");
        if guard.objectives.contains_key(&objective.id) {
            guard.objectives.insert(objective.id, objective);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch_objective(&self, id: ObjectiveId) -> Result<Option<Objective>, RepositoryError> {
        let guard = self.tables.lock().expect("catalog mutex poisoned");
        Ok(guard.objectives.get(&id).cloned())
    }

    fn objectives(&self) -> Result<Vec<Objective>, RepositoryError> {
        let guard = self.tables.lock().expect("catalog mutex poisoned");
        Ok(guard.objectives.values().cloned().collect())
    }

    fn delete_objective(&self, id: ObjectiveId) -> Result<(), RepositoryError> {
        let mut guard = self.tables.lock().expect("catalog mutex poisoned");
        guard
            .objectives
            .remove(&id)
            .ok_or(RepositoryError::NotFound)?;
        guard.competencies.remove(&id);
        Ok(())
    }

    fn insert_competency(&self, competency: Competency) -> Result<Competency, RepositoryError> {
        let mut guard = self.tables.lock().expect("catalog mutex poisoned");
        if guard.competencies.contains_key(&competency.objective_id) {
            return Err(RepositoryError::Conflict);
        }
        guard
            .competencies
            .insert(competency.objective_id, competency.clone());
        Ok(competency)
    }

    fn competencies(&self) -> Result<Vec<Competency>, RepositoryError> {
        let guard = self.tables.lock().expect("catalog mutex poisoned");
        Ok(guard.competencies.values().cloned().collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryRatingRepository {
    records: Arc<Mutex<HashMap<RatingId, IpcrfRating>>>,
}

impl RatingRepository for InMemoryRatingRepository {
    fn insert(&self, record: IpcrfRating) -> Result<IpcrfRating, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id, record.clone());
        Ok(record)
    }

    fn update(&self, record: IpcrfRating) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            guard.insert(record.id, record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: RatingId) -> Result<Option<IpcrfRating>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn for_teacher(&self, teacher_id: TeacherId) -> Result<Vec<IpcrfRating>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| record.teacher_id == teacher_id)
            .cloned()
            .collect())
    }

    fn all(&self) -> Result<Vec<IpcrfRating>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryTeacherDirectory {
    teachers: Arc<Mutex<BTreeMap<TeacherId, Teacher>>>,
}

impl InMemoryTeacherDirectory {
    pub(crate) fn enroll(&self, teacher: Teacher) {
        let mut guard = self.teachers.lock().expect("directory mutex poisoned");
        guard.insert(teacher.id, teacher);
    }
}

impl TeacherDirectory for InMemoryTeacherDirectory {
    fn fetch(&self, id: TeacherId) -> Result<Option<Teacher>, RepositoryError> {
        let guard = self.teachers.lock().expect("directory mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn all(&self) -> Result<Vec<Teacher>, RepositoryError> {
        let guard = self.teachers.lock().expect("directory mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemorySubmissionRepository {
    records: Arc<Mutex<HashMap<SubmissionId, TeacherSubmission>>>,
}

impl SubmissionRepository for InMemorySubmissionRepository {
    fn insert(&self, submission: TeacherSubmission) -> Result<TeacherSubmission, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&submission.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(submission.id, submission.clone());
        Ok(submission)
    }

    fn update(&self, submission: TeacherSubmission) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&submission.id) {
            guard.insert(submission.id, submission);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: SubmissionId) -> Result<Option<TeacherSubmission>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(&id).cloned())
    }
}

/// KRA name followed by its objectives as (code, description, weight, competency type).
type CatalogBlueprint = [(
    &'static str,
    &'static [(&'static str, &'static str, f64, &'static str)],
)];

const STANDARD_CATALOG: &CatalogBlueprint = &[
    (
        "Content Knowledge and Pedagogy",
        &[
            (
                "1.1",
                "Applied knowledge of content within and across curriculum teaching areas",
                7.5,
                "core behavioral",
            ),
            (
                "1.2",
                "Used research-based knowledge and principles of teaching and learning",
                7.5,
                "core behavioral",
            ),
            (
                "1.3",
                "Ensured the positive use of ICT to facilitate the teaching and learning process",
                7.5,
                "technical",
            ),
        ],
    ),
    (
        "Learning Environment and Diversity of Learners",
        &[
            (
                "2.1",
                "Managed classroom structure to engage learners in meaningful exploration",
                7.5,
                "core behavioral",
            ),
            (
                "2.2",
                "Managed learner behavior constructively by applying positive discipline",
                7.5,
                "core behavioral",
            ),
        ],
    ),
    (
        "Curriculum and Planning",
        &[(
            "3.1",
            "Planned, managed and implemented developmentally sequenced teaching and learning",
            7.5,
            "technical",
        )],
    ),
    (
        "Plus Factor",
        &[(
            "4.1",
            "Performed various related works and activities that contribute to the learning process",
            5.0,
            "plus factor",
        )],
    ),
];

/// Load the standard teacher KRAs into an empty catalog.
pub(crate) fn seed_standard_catalog<R>(catalog: &CatalogService<R>) -> Result<(), CatalogError>
where
    R: CatalogRepository + 'static,
{
    for (kra_order, (name, objectives)) in STANDARD_CATALOG.iter().enumerate() {
        let kra = catalog.create_kra(KraInput {
            name: Some((*name).to_string()),
            description: None,
            order: Some(display_order(kra_order)),
        })?;
        for (objective_order, (code, description, weight, competency)) in
            objectives.iter().enumerate()
        {
            catalog.create_objective(NewObjectiveInput {
                kra_id: Some(kra.id),
                fields: ObjectiveInput {
                    code: Some((*code).to_string()),
                    description: Some((*description).to_string()),
                    weight: Some(*weight),
                    order: Some(display_order(objective_order)),
                },
                competency_type: Some((*competency).to_string()),
            })?;
        }
    }
    Ok(())
}

fn display_order(index: usize) -> i32 {
    i32::try_from(index + 1).unwrap_or(i32::MAX)
}

/// Sample roster used outside production.
pub(crate) fn seed_sample_teachers(directory: &InMemoryTeacherDirectory) {
    let roster = [
        (1, "Maria Clara Santos", "Teacher III"),
        (2, "Jose Rizal Cruz", "Teacher I"),
        (3, "Ana Liza Reyes", "Master Teacher I"),
        (4, "Pedro Garcia", "Teacher II"),
    ];
    for (id, name, position) in roster {
        directory.enroll(Teacher {
            id: TeacherId(id),
            name: name.to_string(),
            position: Some(position.to_string()),
        });
    }
}
