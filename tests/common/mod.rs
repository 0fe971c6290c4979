#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use chrono::Utc;
use serde_json::Value as JsonValue;
use tower::ServiceExt;

use mcq_backend::config::{Config, LogFormat};
use mcq_backend::error::{Error, Result};
use mcq_backend::models::admin::Admin;
use mcq_backend::models::class::Class;
use mcq_backend::models::question::{NewQuestion, Question, QuestionType};
use mcq_backend::models::student_attempt::{NewAttempt, StudentAttempt};
use mcq_backend::models::subject::Subject;
use mcq_backend::models::teacher::{Teacher, TeacherAssignments};
use mcq_backend::models::test::{NewTest, Test};
use mcq_backend::repositories::{
    AccountRepository, AttemptRepository, CatalogRepository, QuestionRepository, Repositories,
    TestRepository,
};
use mcq_backend::utils::crypto::hash_password;
use mcq_backend::{routes, AppState};

pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin123";

#[derive(Default)]
struct Tables {
    admins: Vec<Admin>,
    teachers: Vec<Teacher>,
    teacher_classes: Vec<(i32, i32)>,
    teacher_subjects: Vec<(i32, i32)>,
    classes: Vec<Class>,
    subjects: Vec<Subject>,
    tests: Vec<Test>,
    questions: Vec<Question>,
    attempts: Vec<StudentAttempt>,
    next_id: i32,
}

impl Tables {
    fn id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

/// Storage double with the same observable rules as the PostgreSQL tables.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn repositories(self: &Arc<Self>) -> Repositories {
        Repositories {
            accounts: self.clone(),
            catalog: self.clone(),
            tests: self.clone(),
            questions: self.clone(),
            attempts: self.clone(),
        }
    }

    pub fn attempt_count(&self) -> usize {
        self.tables.lock().unwrap().attempts.len()
    }
}

#[async_trait]
impl AccountRepository for MemoryStore {
    async fn find_admin(&self, username: &str) -> Result<Option<Admin>> {
        let t = self.tables.lock().unwrap();
        Ok(t.admins.iter().find(|a| a.username == username).cloned())
    }

    async fn create_admin(&self, username: &str, password_hash: &str) -> Result<Admin> {
        let mut t = self.tables.lock().unwrap();
        let admin = Admin {
            id: t.id(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        };
        t.admins.push(admin.clone());
        Ok(admin)
    }

    async fn find_teacher(&self, username: &str) -> Result<Option<Teacher>> {
        let t = self.tables.lock().unwrap();
        Ok(t.teachers.iter().find(|x| x.username == username).cloned())
    }

    async fn create_teacher(
        &self,
        username: &str,
        password_hash: &str,
        class_ids: &[i32],
        subject_ids: &[i32],
    ) -> Result<Teacher> {
        let mut t = self.tables.lock().unwrap();
        let teacher = Teacher {
            id: t.id(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        };
        let classes: Vec<i32> = t
            .classes
            .iter()
            .filter(|c| class_ids.contains(&c.id))
            .map(|c| c.id)
            .collect();
        let subjects: Vec<i32> = t
            .subjects
            .iter()
            .filter(|s| subject_ids.contains(&s.id))
            .map(|s| s.id)
            .collect();
        t.teacher_classes
            .extend(classes.into_iter().map(|c| (teacher.id, c)));
        t.teacher_subjects
            .extend(subjects.into_iter().map(|s| (teacher.id, s)));
        t.teachers.push(teacher.clone());
        Ok(teacher)
    }

    async fn list_teachers(&self) -> Result<Vec<Teacher>> {
        Ok(self.tables.lock().unwrap().teachers.clone())
    }

    async fn teacher_assignments(&self, teacher_id: i32) -> Result<TeacherAssignments> {
        let t = self.tables.lock().unwrap();
        let classes = t
            .classes
            .iter()
            .filter(|c| t.teacher_classes.contains(&(teacher_id, c.id)))
            .cloned()
            .collect();
        let subjects = t
            .subjects
            .iter()
            .filter(|s| t.teacher_subjects.contains(&(teacher_id, s.id)))
            .cloned()
            .collect();
        Ok(TeacherAssignments { classes, subjects })
    }
}

#[async_trait]
impl CatalogRepository for MemoryStore {
    async fn list_classes(&self) -> Result<Vec<Class>> {
        Ok(self.tables.lock().unwrap().classes.clone())
    }

    async fn create_class(&self, name: &str) -> Result<Class> {
        let mut t = self.tables.lock().unwrap();
        let class = Class {
            id: t.id(),
            name: name.to_string(),
        };
        t.classes.push(class.clone());
        Ok(class)
    }

    async fn find_class(&self, id: i32) -> Result<Option<Class>> {
        let t = self.tables.lock().unwrap();
        Ok(t.classes.iter().find(|c| c.id == id).cloned())
    }

    async fn list_subjects(&self) -> Result<Vec<Subject>> {
        Ok(self.tables.lock().unwrap().subjects.clone())
    }

    async fn create_subject(&self, name: &str) -> Result<Subject> {
        let mut t = self.tables.lock().unwrap();
        let subject = Subject {
            id: t.id(),
            name: name.to_string(),
        };
        t.subjects.push(subject.clone());
        Ok(subject)
    }

    async fn find_subject(&self, id: i32) -> Result<Option<Subject>> {
        let t = self.tables.lock().unwrap();
        Ok(t.subjects.iter().find(|s| s.id == id).cloned())
    }
}

#[async_trait]
impl TestRepository for MemoryStore {
    async fn create(&self, test: NewTest) -> Result<Test> {
        let mut t = self.tables.lock().unwrap();
        let test = Test {
            id: t.id(),
            class_id: test.class_id,
            subject_id: test.subject_id,
            test_date: test.test_date,
            is_active: true,
            created_at: Utc::now(),
        };
        t.tests.push(test.clone());
        Ok(test)
    }

    async fn find(&self, id: i32) -> Result<Option<Test>> {
        let t = self.tables.lock().unwrap();
        Ok(t.tests.iter().find(|x| x.id == id).cloned())
    }

    async fn set_active(&self, id: i32, is_active: bool) -> Result<Option<Test>> {
        let mut t = self.tables.lock().unwrap();
        Ok(t.tests.iter_mut().find(|x| x.id == id).map(|test| {
            test.is_active = is_active;
            test.clone()
        }))
    }

    async fn first_active_for_class(&self, class_id: i32) -> Result<Option<Test>> {
        let t = self.tables.lock().unwrap();
        Ok(t.tests
            .iter()
            .find(|x| x.class_id == class_id && x.is_active)
            .cloned())
    }

    async fn list_active_for(&self, class_ids: &[i32], subject_ids: &[i32]) -> Result<Vec<Test>> {
        let t = self.tables.lock().unwrap();
        Ok(t.tests
            .iter()
            .filter(|x| {
                x.is_active && class_ids.contains(&x.class_id) && subject_ids.contains(&x.subject_id)
            })
            .cloned()
            .collect())
    }
}

#[async_trait]
impl QuestionRepository for MemoryStore {
    async fn create(&self, question: NewQuestion) -> Result<Question> {
        let mut t = self.tables.lock().unwrap();
        let question = Question {
            id: t.id(),
            test_id: question.test_id,
            teacher_id: question.teacher_id,
            question_text: question.question_text,
            question_type: question.question_type,
            media_url: question.media_url,
            options: question.options,
            correct_option: question.correct_option,
        };
        t.questions.push(question.clone());
        Ok(question)
    }

    async fn list_for_test(&self, test_id: i32) -> Result<Vec<Question>> {
        let t = self.tables.lock().unwrap();
        Ok(t.questions
            .iter()
            .filter(|q| q.test_id == test_id)
            .cloned()
            .collect())
    }

    async fn count_for_test(&self, test_id: i32) -> Result<i64> {
        let t = self.tables.lock().unwrap();
        Ok(t.questions.iter().filter(|q| q.test_id == test_id).count() as i64)
    }
}

#[async_trait]
impl AttemptRepository for MemoryStore {
    async fn exists(&self, test_id: i32, roll_no: &str, section: &str) -> Result<bool> {
        let t = self.tables.lock().unwrap();
        Ok(t.attempts
            .iter()
            .any(|a| a.test_id == test_id && a.roll_no == roll_no && a.section == section))
    }

    async fn create(&self, attempt: NewAttempt) -> Result<StudentAttempt> {
        let mut t = self.tables.lock().unwrap();
        let taken = t.attempts.iter().any(|a| {
            a.test_id == attempt.test_id
                && a.roll_no == attempt.roll_no
                && a.section == attempt.section
        });
        if taken {
            return Err(Error::AlreadyAttempted(
                "You have already submitted this test".to_string(),
            ));
        }
        let stored = StudentAttempt {
            id: t.id(),
            test_id: attempt.test_id,
            roll_no: attempt.roll_no,
            student_name: attempt.student_name,
            section: attempt.section,
            answers: attempt.answers,
            score: attempt.score,
            completed_at: attempt.completed_at,
        };
        t.attempts.push(stored.clone());
        Ok(stored)
    }

    async fn find(
        &self,
        test_id: i32,
        roll_no: &str,
        section: &str,
    ) -> Result<Option<StudentAttempt>> {
        let t = self.tables.lock().unwrap();
        Ok(t.attempts
            .iter()
            .find(|a| a.test_id == test_id && a.roll_no == roll_no && a.section == section)
            .cloned())
    }

    async fn list_for_class(&self, class_id: i32) -> Result<Vec<StudentAttempt>> {
        let t = self.tables.lock().unwrap();
        let test_ids: Vec<i32> = t
            .tests
            .iter()
            .filter(|x| x.class_id == class_id)
            .map(|x| x.id)
            .collect();
        Ok(t.attempts
            .iter()
            .filter(|a| test_ids.contains(&a.test_id))
            .cloned()
            .collect())
    }
}

pub fn test_config() -> Config {
    Config {
        server_address: "127.0.0.1:0".into(),
        database_url: "postgres://unused".into(),
        db_max_connections: 1,
        jwt_secret: "integration-test-secret".into(),
        access_token_expire_minutes: 30,
        admin_username: ADMIN_USER.into(),
        admin_password: ADMIN_PASSWORD.into(),
        test_duration_minutes: 60,
        log_format: LogFormat::Text,
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub store: Arc<MemoryStore>,
}

/// Router over an empty in-memory store with the bootstrap admin seeded.
pub async fn spawn_app() -> TestApp {
    let store = Arc::new(MemoryStore::default());
    let config = test_config();
    let state = AppState::with_repositories(store.repositories(), &config);
    state
        .auth_service
        .ensure_admin(ADMIN_USER, ADMIN_PASSWORD)
        .await
        .expect("seed admin");
    TestApp {
        router: routes::build_router(state.clone()),
        state,
        store,
    }
}

impl TestApp {
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<JsonValue>,
    ) -> (StatusCode, JsonValue) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let req = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            JsonValue::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null)
        };
        (status, json)
    }

    pub async fn admin_token(&self) -> String {
        let (status, body) = self
            .send(
                "POST",
                "/admin/login",
                None,
                Some(serde_json::json!({"username": ADMIN_USER, "password": ADMIN_PASSWORD})),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["access_token"].as_str().unwrap().to_string()
    }

    pub async fn teacher_token(&self, username: &str, password: &str) -> String {
        let (status, body) = self
            .send(
                "POST",
                "/teacher/login",
                None,
                Some(serde_json::json!({"username": username, "password": password})),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["access_token"].as_str().unwrap().to_string()
    }
}

/// Ids of a seeded class, subject, assigned teacher and active test.
pub struct Seed {
    pub class_id: i32,
    pub subject_id: i32,
    pub test_id: i32,
    pub teacher: String,
    pub teacher_password: String,
}

pub async fn seed_school(app: &TestApp) -> Seed {
    let store = &app.store;
    let class = store.create_class("10-A").await.unwrap();
    let subject = store.create_subject("Physics").await.unwrap();
    let hash = hash_password("chalkboard").unwrap();
    store
        .create_teacher("mr_khan", &hash, &[class.id], &[subject.id])
        .await
        .unwrap();
    let test = TestRepository::create(
        store.as_ref(),
        NewTest {
            class_id: class.id,
            subject_id: subject.id,
            test_date: Utc::now(),
        },
    )
    .await
    .unwrap();
    Seed {
        class_id: class.id,
        subject_id: subject.id,
        test_id: test.id,
        teacher: "mr_khan".into(),
        teacher_password: "chalkboard".into(),
    }
}

pub async fn add_question(app: &TestApp, test_id: i32, correct_option: i32) -> Question {
    QuestionRepository::create(
        app.store.as_ref(),
        NewQuestion {
            test_id,
            teacher_id: 0,
            question_text: format!("Question with answer {}", correct_option),
            question_type: QuestionType::Text,
            media_url: None,
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct_option,
        },
    )
    .await
    .unwrap()
}
