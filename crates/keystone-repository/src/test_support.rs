//! In-memory DAO for repository tests.
//!
//! Writes made through a transaction are staged on a copy of the store and
//! only become visible on commit, so rollback is observable from outside.

use crate::{
    dao::{UserDao, UserFilter, UserTransaction},
    Projection,
};
use async_trait::async_trait;
use keystone_core::{KeystoneError, KeystoneResult, Plan, User};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Failures the in-memory store can be told to produce.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Faults {
    pub fail_insert: bool,
    pub fail_replace: bool,
    pub replace_modifies_nothing: bool,
    /// Writes report success but are never stored.
    pub lose_writes: bool,
    pub fail_commit: bool,
}

#[derive(Default)]
pub(crate) struct Counters {
    pub user_queries: AtomicUsize,
    pub plan_queries: AtomicUsize,
    pub commits: AtomicUsize,
    pub aborts: AtomicUsize,
}

impl Counters {
    pub fn get(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

pub(crate) struct InMemoryUserDao {
    users: Arc<Mutex<Vec<User>>>,
    plans: Mutex<Vec<Plan>>,
    faults: Mutex<Faults>,
    pub counters: Arc<Counters>,
}

impl InMemoryUserDao {
    pub fn new() -> Self {
        Self {
            users: Arc::new(Mutex::new(Vec::new())),
            plans: Mutex::new(Vec::new()),
            faults: Mutex::new(Faults::default()),
            counters: Arc::new(Counters::default()),
        }
    }

    pub fn with_user(self, user: User) -> Self {
        self.users.lock().unwrap().push(user);
        self
    }

    pub fn with_plan(self, plan: Plan) -> Self {
        self.plans.lock().unwrap().push(plan);
        self
    }

    pub fn inject(&self, faults: Faults) {
        *self.faults.lock().unwrap() = faults;
    }

    /// Committed state, bypassing projections.
    pub fn stored(&self, user_id: &str) -> Option<User> {
        self.users.lock().unwrap().iter().find(|u| u.id == user_id).cloned()
    }

    pub fn stored_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

/// Applies a projection the way the server would, by dropping field paths.
fn project(user: &User, projection: &Projection) -> KeystoneResult<User> {
    let mut value = serde_json::to_value(user)?;
    for field in projection.excluded() {
        remove_path(&mut value, field);
    }
    Ok(serde_json::from_value(value)?)
}

fn remove_path(value: &mut Value, path: &str) {
    match path.split_once('.') {
        Some((head, rest)) => {
            if let Some(inner) = value.get_mut(head) {
                remove_path(inner, rest);
            }
        }
        None => {
            if let Some(object) = value.as_object_mut() {
                object.remove(path);
            }
        }
    }
}

#[async_trait]
impl UserDao<User> for InMemoryUserDao {
    async fn find_user(&self, filter: UserFilter<'_>, projection: &Projection) -> KeystoneResult<Option<User>> {
        self.counters.user_queries.fetch_add(1, Ordering::SeqCst);
        let users = self.users.lock().unwrap();
        let matches: Vec<&User> = users.iter().filter(|u| filter.matches(*u)).collect();
        match matches.as_slice() {
            [] => Ok(None),
            [user] => project(user, projection).map(Some),
            _ => Err(KeystoneError::database(format!(
                "more than one user matches {}",
                filter.field()
            ))),
        }
    }

    async fn find_plan(&self, plan_id: &str, _projection: &Projection) -> KeystoneResult<Option<Plan>> {
        self.counters.plan_queries.fetch_add(1, Ordering::SeqCst);
        Ok(self.plans.lock().unwrap().iter().find(|p| p.id == plan_id).cloned())
    }

    async fn begin(&self) -> KeystoneResult<Box<dyn UserTransaction<User>>> {
        let staged = self.users.lock().unwrap().clone();
        Ok(Box::new(InMemoryTransaction {
            shared: Arc::clone(&self.users),
            staged,
            faults: *self.faults.lock().unwrap(),
            counters: Arc::clone(&self.counters),
        }))
    }
}

struct InMemoryTransaction {
    shared: Arc<Mutex<Vec<User>>>,
    staged: Vec<User>,
    faults: Faults,
    counters: Arc<Counters>,
}

#[async_trait]
impl UserTransaction<User> for InMemoryTransaction {
    async fn find_by_id(&mut self, user_id: &str, projection: &Projection) -> KeystoneResult<Option<User>> {
        self.counters.user_queries.fetch_add(1, Ordering::SeqCst);
        self.staged
            .iter()
            .find(|u| u.id == user_id)
            .map(|u| project(u, projection))
            .transpose()
    }

    async fn insert(&mut self, user: &User) -> KeystoneResult<()> {
        if self.faults.fail_insert {
            return Err(KeystoneError::Conflict("duplicate key".to_string()));
        }
        if !self.faults.lose_writes {
            self.staged.push(user.clone());
        }
        Ok(())
    }

    async fn replace(&mut self, user_id: &str, user: &User) -> KeystoneResult<u64> {
        if self.faults.fail_replace {
            return Err(KeystoneError::database("connection reset during replace"));
        }
        if self.faults.replace_modifies_nothing || self.faults.lose_writes {
            return Ok(if self.faults.lose_writes { 1 } else { 0 });
        }
        match self.staged.iter_mut().find(|u| u.id == user_id) {
            Some(existing) if existing == user => Ok(0),
            Some(existing) => {
                *existing = user.clone();
                Ok(1)
            }
            None => {
                self.staged.push(user.clone());
                Ok(0)
            }
        }
    }

    async fn commit(self: Box<Self>) -> KeystoneResult<()> {
        if self.faults.fail_commit {
            return Err(KeystoneError::database("commit failed"));
        }
        *self.shared.lock().unwrap() = self.staged;
        self.counters.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn abort(self: Box<Self>) -> KeystoneResult<()> {
        self.counters.aborts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Tracing layer counting `ERROR` events.
#[derive(Clone, Default)]
pub(crate) struct ErrorCounter(Arc<AtomicUsize>);

impl ErrorCounter {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    /// Installs the counter as the thread default subscriber.
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        use tracing_subscriber::layer::SubscriberExt;
        tracing::subscriber::set_default(tracing_subscriber::registry().with(self.clone()))
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for ErrorCounter {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        if *event.metadata().level() == tracing::Level::ERROR {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}
