//! In-memory PetQuery for unit tests

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use pets_core::{
    BackendDescriptor, Pet, PetQuery, Pets, QueryError, QueryResult, TraceContext,
};

/// Canned answer for one URL
#[derive(Clone)]
pub enum Answer {
    Collection(Pets),
    Item(Pet),
    Refused,
    Status(u16),
}

/// Mock backend set keyed by URL. Unknown URLs refuse the connection.
#[derive(Default)]
pub struct MockQuery {
    answers: HashMap<String, Answer>,
    /// URL and traceparent of every call, in call order
    pub calls: Mutex<Vec<(String, Option<String>)>>,
}

impl MockQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(mut self, url: impl Into<String>, answer: Answer) -> Self {
        self.answers.insert(url.into(), answer);
        self
    }

    pub fn called_urls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(url, _)| url.clone())
            .collect()
    }

    fn record(&self, url: &str, trace: Option<&TraceContext>) -> Option<Answer> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), trace.map(|t| t.to_traceparent())));
        self.answers.get(url).cloned()
    }
}

#[async_trait]
impl PetQuery for MockQuery {
    async fn query_pets(&self, url: &str, trace: Option<&TraceContext>) -> QueryResult<Pets> {
        match self.record(url, trace) {
            Some(Answer::Collection(pets)) => Ok(pets),
            Some(Answer::Status(status)) => Err(QueryError::BadStatus {
                status,
                message: "mock".to_string(),
            }),
            Some(Answer::Item(_)) => Err(QueryError::Decode("expected collection".to_string())),
            Some(Answer::Refused) | None => {
                Err(QueryError::Connection(format!("connection refused: {}", url)))
            }
        }
    }

    async fn query_pet(&self, url: &str, trace: Option<&TraceContext>) -> QueryResult<Pet> {
        match self.record(url, trace) {
            Some(Answer::Item(pet)) => Ok(pet),
            Some(Answer::Status(status)) => Err(QueryError::BadStatus {
                status,
                message: "mock".to_string(),
            }),
            Some(Answer::Collection(_)) => Err(QueryError::Decode("expected item".to_string())),
            Some(Answer::Refused) | None => {
                Err(QueryError::Connection(format!("connection refused: {}", url)))
            }
        }
    }
}

pub fn backend(name: &str, port: u16) -> BackendDescriptor {
    BackendDescriptor::new(name, "localhost", port, format!("/{}/v1/data", name))
}

/// A provider collection with one item per name, `Index` starting at 1
pub fn collection(provider_host: &str, context: &str, names: &[&str]) -> Pets {
    let items: Vec<Pet> = names
        .iter()
        .enumerate()
        .map(|(i, name)| Pet {
            index: i as u32 + 1,
            name: name.to_string(),
            kind: "mock".to_string(),
            age: 3,
            hostname: provider_host.to_string(),
            uri: format!("{}/{}", context, i + 1),
            ..Default::default()
        })
        .collect();

    Pets {
        total: items.len() as u64,
        hostname: provider_host.to_string(),
        hostnames: Vec::new(),
        items,
    }
}
