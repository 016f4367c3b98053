//! Browser ability

use std::fmt;
use std::marker::PhantomData;

use screenplay_actor::{Ability, Actor, Question};
use screenplay_core_types::Result;
use thiserror::Error;

/// Minimal surface of a browser session the core relies on.
///
/// Element-level operations belong to tasks and questions built on top of
/// a concrete driver, reached through [`BrowseTheWeb::driver`].
pub trait WebDriver: Send + Sync + 'static {
    fn current_url(&self) -> Result<String>;

    fn title(&self) -> Result<String>;

    fn quit(&mut self) -> Result<()>;
}

/// A page handle that no longer points at a live element or document.
///
/// The usual error to hand to `Retry::on`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("stale handle: {0}")]
pub struct StaleHandle(pub String);

impl StaleHandle {
    pub fn new(what: impl Into<String>) -> Self {
        Self(what.into())
    }
}

/// Lets an actor drive a browser.
pub struct BrowseTheWeb<D> {
    driver: D,
}

impl<D: WebDriver> BrowseTheWeb<D> {
    pub fn with(driver: D) -> Self {
        Self { driver }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn into_driver(self) -> D {
        self.driver
    }

    /// Ends the browser session. The ability stays registered.
    pub fn quit(&mut self) -> Result<()> {
        tracing::debug!("quitting browser session");
        self.driver.quit()
    }
}

impl<D: WebDriver> Ability for BrowseTheWeb<D> {}

impl<D> fmt::Debug for BrowseTheWeb<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrowseTheWeb")
            .field("driver", &std::any::type_name::<D>())
            .finish()
    }
}

/// URL of the page the actor's browser is on.
pub struct TheCurrentUrl<D> {
    _driver: PhantomData<fn() -> D>,
}

impl<D> TheCurrentUrl<D> {
    pub fn of_the_browser() -> Self {
        Self {
            _driver: PhantomData,
        }
    }
}

impl<D> fmt::Display for TheCurrentUrl<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("the current url")
    }
}

impl<D: WebDriver> Question for TheCurrentUrl<D> {
    type Answer = String;

    fn request_as(&self, actor: &Actor) -> Result<String> {
        actor.using::<BrowseTheWeb<D>>()?.driver().current_url()
    }
}

/// Title of the page the actor's browser is on.
pub struct ThePageTitle<D> {
    _driver: PhantomData<fn() -> D>,
}

impl<D> ThePageTitle<D> {
    pub fn of_the_browser() -> Self {
        Self {
            _driver: PhantomData,
        }
    }
}

impl<D> fmt::Display for ThePageTitle<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("the page title")
    }
}

impl<D: WebDriver> Question for ThePageTitle<D> {
    type Answer = String;

    fn request_as(&self, actor: &Actor) -> Result<String> {
        actor.using::<BrowseTheWeb<D>>()?.driver().title()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use screenplay_core_types::ScreenplayError;

    #[derive(Default)]
    struct ScriptedDriver {
        url: String,
        title: String,
        stale: bool,
        quit: bool,
    }

    impl WebDriver for ScriptedDriver {
        fn current_url(&self) -> Result<String> {
            Ok(self.url.clone())
        }

        fn title(&self) -> Result<String> {
            if self.stale {
                return Err(ScreenplayError::interaction(StaleHandle::new("document")));
            }
            Ok(self.title.clone())
        }

        fn quit(&mut self) -> Result<()> {
            self.quit = true;
            Ok(())
        }
    }

    fn browsing(driver: ScriptedDriver) -> Actor {
        Actor::new("Bea")
            .who_can(BrowseTheWeb::with(driver))
            .unwrap()
    }

    #[test]
    fn questions_read_through_the_driver() {
        let actor = browsing(ScriptedDriver {
            url: "https://shop.test/cart".into(),
            title: "Cart".into(),
            ..ScriptedDriver::default()
        });
        let url = actor
            .asks_for(&TheCurrentUrl::<ScriptedDriver>::of_the_browser())
            .unwrap();
        assert_eq!(url, "https://shop.test/cart");
        let title = actor
            .asks_for(&ThePageTitle::<ScriptedDriver>::of_the_browser())
            .unwrap();
        assert_eq!(title, "Cart");
    }

    #[test]
    fn stale_page_surfaces_as_transient() {
        let actor = browsing(ScriptedDriver {
            stale: true,
            ..ScriptedDriver::default()
        });
        let err = actor
            .asks_for(&ThePageTitle::<ScriptedDriver>::of_the_browser())
            .unwrap_err();
        assert!(err.is_transient::<StaleHandle>());
        assert_eq!(err.to_string(), "stale handle: document");
    }

    #[test]
    fn missing_browser_names_the_ability() {
        let actor = Actor::new("Bea");
        let err = actor
            .asks_for(&TheCurrentUrl::<ScriptedDriver>::of_the_browser())
            .unwrap_err();
        match err {
            ScreenplayError::MissingAbility { actor, ability } => {
                assert_eq!(actor, "Bea");
                assert_eq!(ability, "BrowseTheWeb<ScriptedDriver>");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn quit_mutates_the_registered_driver() {
        let mut actor = browsing(ScriptedDriver::default());
        actor
            .using_mut::<BrowseTheWeb<ScriptedDriver>>()
            .unwrap()
            .quit()
            .unwrap();
        assert!(actor
            .using::<BrowseTheWeb<ScriptedDriver>>()
            .unwrap()
            .driver()
            .quit);
    }
}
