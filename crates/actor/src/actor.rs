//! The actor: ability owner and interaction dispatcher

use std::fmt;
use std::sync::Arc;

use screenplay_core_types::{Result, ScreenplayError};

use crate::ability::{ability_name, Ability, AbilityRegistry};
use crate::interaction::{AsyncQuestion, AsyncTask, Question, Task};
use crate::logger::{Logger, NoOpLogger};

/// Name given to actors built without one.
pub const DEFAULT_ACTOR_NAME: &str = "Screenplay";

/// Log phrasing around one dispatch. Every public verb shares the same
/// dispatch routine and differs only in these words.
#[derive(Clone, Copy)]
struct Phrase {
    enter: &'static str,
    exit: &'static str,
}

const ATTEMPTS_TO: Phrase = Phrase {
    enter: "attempts to",
    exit: "successfully completed",
};

const CALLS: Phrase = Phrase {
    enter: "calls",
    exit: "finished calling",
};

const ASKS_FOR: Phrase = Phrase {
    enter: "asks for",
    exit: "sees that",
};

const ASKING_FOR: Phrase = Phrase {
    enter: "is asking for",
    exit: "got",
};

const CALLS_FOR: Phrase = Phrase {
    enter: "calls for",
    exit: "received",
};

/// Holds abilities and performs interactions.
///
/// An actor is driven by one logical thread of control at a time. Abilities
/// are not locked internally; sharing an actor across threads only works for
/// abilities that are themselves safe to share.
pub struct Actor {
    name: String,
    logger: Arc<dyn Logger>,
    abilities: AbilityRegistry,
}

impl Actor {
    /// Actor with a no-op logger.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_logger(name, Arc::new(NoOpLogger::new()))
    }

    pub fn with_logger(name: impl Into<String>, logger: Arc<dyn Logger>) -> Self {
        let name = name.into();
        let name = if name.trim().is_empty() {
            DEFAULT_ACTOR_NAME.to_string()
        } else {
            name
        };
        Self {
            name,
            logger,
            abilities: AbilityRegistry::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn logger(&self) -> &dyn Logger {
        self.logger.as_ref()
    }

    /// Swaps the logger, keeping abilities.
    pub fn set_logger(&mut self, logger: Arc<dyn Logger>) {
        self.logger = logger;
    }

    pub fn abilities(&self) -> &AbilityRegistry {
        &self.abilities
    }

    /// Grants an ability. Fails if one of the same type is already held.
    pub fn can<A: Ability>(&mut self, ability: A) -> Result<&mut Self> {
        if self.abilities.insert(ability).is_err() {
            return Err(ScreenplayError::DuplicateAbility {
                actor: self.name.clone(),
                ability: ability_name::<A>(),
            });
        }
        self.logger
            .info(&format!("{} can {}", self.name, ability_name::<A>()));
        Ok(self)
    }

    /// Builder form of [`Actor::can`].
    pub fn who_can<A: Ability>(mut self, ability: A) -> Result<Self> {
        self.can(ability)?;
        Ok(self)
    }

    pub fn using<A: Ability>(&self) -> Result<&A> {
        self.abilities
            .get::<A>()
            .ok_or_else(|| self.missing::<A>())
    }

    pub fn using_mut<A: Ability>(&mut self) -> Result<&mut A> {
        self.abilities
            .get_mut::<A>()
            .ok_or_else(|| ScreenplayError::MissingAbility {
                actor: self.name.clone(),
                ability: ability_name::<A>(),
            })
    }

    pub fn has_ability_to<A: Ability>(&self) -> bool {
        self.abilities.contains::<A>()
    }

    /// Releases one ability, handing it back to the caller.
    pub fn forget<A: Ability>(&mut self) -> Option<A> {
        self.abilities.remove::<A>()
    }

    /// Releases every ability.
    pub fn forget_all(&mut self) {
        self.abilities.clear();
    }

    fn missing<A: Ability>(&self) -> ScreenplayError {
        ScreenplayError::MissingAbility {
            actor: self.name.clone(),
            ability: ability_name::<A>(),
        }
    }

    pub fn attempts_to<T: Task + ?Sized>(&self, task: &T) -> Result<()> {
        self.dispatch_task(task, ATTEMPTS_TO)
    }

    pub fn calls<T: Task + ?Sized>(&self, task: &T) -> Result<()> {
        self.dispatch_task(task, CALLS)
    }

    /// Runs tasks left to right, stopping at the first failure.
    pub fn attempts_to_all(&self, tasks: &[&dyn Task]) -> Result<()> {
        for task in tasks {
            self.dispatch_task(*task, ATTEMPTS_TO)?;
        }
        Ok(())
    }

    pub fn asks_for<Q: Question + ?Sized>(&self, question: &Q) -> Result<Q::Answer> {
        self.dispatch_question(question, ASKS_FOR)
    }

    pub fn asking_for<Q: Question + ?Sized>(&self, question: &Q) -> Result<Q::Answer> {
        self.dispatch_question(question, ASKING_FOR)
    }

    pub fn calls_for<Q: Question + ?Sized>(&self, question: &Q) -> Result<Q::Answer> {
        self.dispatch_question(question, CALLS_FOR)
    }

    pub async fn attempts_to_async<T: AsyncTask + ?Sized>(&self, task: &T) -> Result<()> {
        self.dispatch_task_async(task, ATTEMPTS_TO).await
    }

    pub async fn calls_async<T: AsyncTask + ?Sized>(&self, task: &T) -> Result<()> {
        self.dispatch_task_async(task, CALLS).await
    }

    /// Awaits tasks one after another, stopping at the first failure.
    pub async fn attempts_to_all_async(&self, tasks: &[&dyn AsyncTask]) -> Result<()> {
        for task in tasks {
            self.dispatch_task_async(*task, ATTEMPTS_TO).await?;
        }
        Ok(())
    }

    pub async fn asks_for_async<Q: AsyncQuestion + ?Sized>(
        &self,
        question: &Q,
    ) -> Result<Q::Answer> {
        self.dispatch_question_async(question, ASKS_FOR).await
    }

    pub async fn asking_for_async<Q: AsyncQuestion + ?Sized>(
        &self,
        question: &Q,
    ) -> Result<Q::Answer> {
        self.dispatch_question_async(question, ASKING_FOR).await
    }

    pub async fn calls_for_async<Q: AsyncQuestion + ?Sized>(
        &self,
        question: &Q,
    ) -> Result<Q::Answer> {
        self.dispatch_question_async(question, CALLS_FOR).await
    }

    pub fn log_artifact(&self, kind: &str, path: &str) {
        self.logger.log_artifact(kind, path);
    }

    fn dispatch_task<T: Task + ?Sized>(&self, task: &T, phrase: Phrase) -> Result<()> {
        self.logger
            .info(&format!("{} {} {}", self.name, phrase.enter, task));
        task.perform_as(self)?;
        self.logger
            .info(&format!("{} {} {}", self.name, phrase.exit, task));
        Ok(())
    }

    fn dispatch_question<Q: Question + ?Sized>(
        &self,
        question: &Q,
        phrase: Phrase,
    ) -> Result<Q::Answer> {
        self.logger
            .info(&format!("{} {} {}", self.name, phrase.enter, question));
        let answer = question.request_as(self)?;
        self.logger.info(&format!(
            "{} {} {} is {:?}",
            self.name, phrase.exit, question, answer
        ));
        Ok(answer)
    }

    async fn dispatch_task_async<T: AsyncTask + ?Sized>(
        &self,
        task: &T,
        phrase: Phrase,
    ) -> Result<()> {
        self.logger
            .info(&format!("{} {} {}", self.name, phrase.enter, task));
        AsyncTask::perform_as(task, self).await?;
        self.logger
            .info(&format!("{} {} {}", self.name, phrase.exit, task));
        Ok(())
    }

    async fn dispatch_question_async<Q: AsyncQuestion + ?Sized>(
        &self,
        question: &Q,
        phrase: Phrase,
    ) -> Result<Q::Answer> {
        self.logger
            .info(&format!("{} {} {}", self.name, phrase.enter, question));
        let answer = AsyncQuestion::request_as(question, self).await?;
        self.logger.info(&format!(
            "{} {} {} is {:?}",
            self.name, phrase.exit, question, answer
        ));
        Ok(answer)
    }
}

impl Default for Actor {
    fn default() -> Self {
        Self::new(DEFAULT_ACTOR_NAME)
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Debug for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Actor")
            .field("name", &self.name)
            .field("abilities", &self.abilities)
            .field("lowest_severity", &self.logger.lowest_severity())
            .finish()
    }
}
