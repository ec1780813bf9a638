//! Boundary Composer
//!
//! Wraps a subtree so that a pending read renders a placeholder and a failed
//! read (or a failed render) renders a fallback instead of escaping.
//!
//! ```text
//! idle ──render──▶ suspended ──settled Ok──▶ (re-render) ──▶ content
//!   │                  │
//!   │                  └──settled Err──▶ error (terminal until remount)
//!   └──render fails──────────────────▶ error
//! ```

use std::fmt;
use std::sync::Arc;

use crate::boundary::{Element, Node};
use crate::error::StorefrontError;
use crate::query::{Interrupt, Suspension};

/// Renders a node for a captured error.
pub type Fallback = Arc<dyn Fn(&StorefrontError) -> Node + Send + Sync>;

// == Boundary Options ==
#[derive(Clone)]
pub struct BoundaryOptions {
    pub placeholder: Node,
    pub fallback: Option<Fallback>,
}

impl BoundaryOptions {
    pub fn new(placeholder: impl Into<Node>) -> Self {
        Self {
            placeholder: placeholder.into(),
            fallback: None,
        }
    }

    pub fn with_fallback(
        mut self,
        fallback: impl Fn(&StorefrontError) -> Node + Send + Sync + 'static,
    ) -> Self {
        self.fallback = Some(Arc::new(fallback));
        self
    }
}

impl fmt::Debug for BoundaryOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundaryOptions")
            .field("placeholder", &self.placeholder)
            .field("fallback", &self.fallback.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// The generic message shown when no fallback is supplied.
pub fn default_fallback(error: &StorefrontError) -> Node {
    Element::new("div")
        .class("error-boundary")
        .child(Element::new("h2").text("Something went wrong"))
        .child(Element::new("p").class("error-message").text(error.to_string()))
        .into()
}

// == Boundary State ==
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryState {
    Idle,
    Suspended,
    Error(StorefrontError),
    Content,
}

// == Boundary ==
#[derive(Debug)]
pub struct Boundary {
    options: BoundaryOptions,
    state: BoundaryState,
    pending: Option<Suspension>,
}

impl Boundary {
    pub fn new(options: BoundaryOptions) -> Self {
        Self {
            options,
            state: BoundaryState::Idle,
            pending: None,
        }
    }

    pub fn state(&self) -> &BoundaryState {
        &self.state
    }

    fn fail(&mut self, error: StorefrontError) -> Node {
        let node = match &self.options.fallback {
            Some(fallback) => fallback(&error),
            None => default_fallback(&error),
        };
        self.state = BoundaryState::Error(error);
        node
    }

    // == Render ==
    /// One synchronous render pass.
    ///
    /// Once in the error state the children are never invoked again.
    pub fn render<C>(&mut self, mut children: C) -> Node
    where
        C: FnMut() -> Result<Node, Interrupt>,
    {
        if let BoundaryState::Error(error) = &self.state {
            let error = error.clone();
            return self.fail(error);
        }

        match children() {
            Ok(node) => {
                self.pending = None;
                self.state = BoundaryState::Content;
                node
            }
            Err(Interrupt::Suspend(suspension)) => {
                self.pending = Some(suspension);
                self.state = BoundaryState::Suspended;
                self.options.placeholder.clone()
            }
            Err(Interrupt::Fail(error)) => {
                self.pending = None;
                self.fail(error)
            }
        }
    }

    // == Resolve ==
    /// Renders until the boundary leaves the suspended state.
    ///
    /// Each suspension is awaited and the children re-entered after it
    /// settles; a rejection moves the boundary to its error state. Dropping
    /// the returned future abandons the boundary without touching the fetch.
    pub async fn resolve<C>(&mut self, mut children: C) -> Node
    where
        C: FnMut() -> Result<Node, Interrupt>,
    {
        loop {
            let node = self.render(&mut children);

            let Some(suspension) = self.pending.take() else {
                return node;
            };

            if let Err(error) = suspension.settled().await {
                return self.fail(error);
            }
        }
    }

    /// Resets to idle, as if freshly mounted.
    pub fn remount(&mut self) {
        self.pending = None;
        self.state = BoundaryState::Idle;
    }
}

// == Wrap ==
/// Mounts a fresh boundary around `children` and resolves it.
pub async fn wrap<C>(children: C, options: BoundaryOptions) -> Node
where
    C: FnMut() -> Result<Node, Interrupt>,
{
    Boundary::new(options).resolve(children).await
}
