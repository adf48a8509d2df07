//! Fluent builder for constructing a [`Frame`].

use av_core::{AvatarId, FrameConfig, Pose};
use av_responder::{ResponderChain, ResponderRegistry};
use av_walker::{StockConfig, WalkManager, WalkerRegistry, register_defaults};

use crate::{Frame, FrameResult, InputQueue};

/// Fluent builder for [`Frame`].
///
/// # Optional inputs (have defaults)
///
/// | Method                      | Default                                     |
/// |-----------------------------|---------------------------------------------|
/// | `.avatar(id, pose)`         | `AvatarId(0)` at `Pose::IDENTITY`           |
/// | `.responders(chain)`        | Empty `ResponderChain`                      |
/// | `.responder_registry(reg)`  | Empty registry                              |
/// | `.walkers(manager)`         | `WalkManager::with_default_chain()`         |
/// | `.walker_registry(reg)`     | Empty registry                              |
/// | `.stock(config)`            | Not installed; default chain stages resolve |
/// |                             | to nothing and pass the pose through        |
///
/// # Example
///
/// ```rust,ignore
/// let mut frame = FrameBuilder::new(config)
///     .avatar(AvatarId(3), spawn)
///     .responders(chain)
///     .responder_registry(handlers)
///     .stock(stock)
///     .build()?;
/// ```
pub struct FrameBuilder {
    config:             FrameConfig,
    avatar:             AvatarId,
    pose:               Pose,
    responders:         Option<ResponderChain>,
    responder_registry: Option<ResponderRegistry>,
    walkers:            Option<WalkManager>,
    walker_registry:    Option<WalkerRegistry>,
    stock:              Option<StockConfig>,
}

impl FrameBuilder {
    pub fn new(config: FrameConfig) -> Self {
        Self {
            config,
            avatar:             AvatarId(0),
            pose:               Pose::IDENTITY,
            responders:         None,
            responder_registry: None,
            walkers:            None,
            walker_registry:    None,
            stock:              None,
        }
    }

    /// The avatar this frame resolves and its starting pose.
    pub fn avatar(mut self, avatar: AvatarId, pose: Pose) -> Self {
        self.avatar = avatar;
        self.pose = pose;
        self
    }

    pub fn responders(mut self, chain: ResponderChain) -> Self {
        self.responders = Some(chain);
        self
    }

    pub fn responder_registry(mut self, registry: ResponderRegistry) -> Self {
        self.responder_registry = Some(registry);
        self
    }

    /// Replace the default walker chain composition.
    pub fn walkers(mut self, manager: WalkManager) -> Self {
        self.walkers = Some(manager);
        self
    }

    pub fn walker_registry(mut self, registry: WalkerRegistry) -> Self {
        self.walker_registry = Some(registry);
        self
    }

    /// Install the stock walkers into the walker registry at build time,
    /// with the avatar's starting pose as its first valid pose.
    pub fn stock(mut self, config: StockConfig) -> Self {
        self.stock = Some(config);
        self
    }

    /// Validate the configuration, resolve defaults, and return a ready
    /// [`Frame`].
    pub fn build(self) -> FrameResult<Frame> {
        self.config.validate()?;

        let walkers = match self.walkers {
            Some(w) => w,
            None => WalkManager::with_default_chain()?,
        };
        let mut walker_registry = self.walker_registry.unwrap_or_default();

        let last_valid = match &self.stock {
            Some(stock) => {
                let ledger = register_defaults(&mut walker_registry, stock)?;
                ledger.record(self.avatar, self.pose);
                Some(ledger)
            }
            None => None,
        };

        Ok(Frame {
            clock:              self.config.make_clock(),
            input:              InputQueue::with_capacity(self.config.max_pending_inputs),
            config:             self.config,
            avatar:             self.avatar,
            pose:               self.pose,
            responders:         self.responders.unwrap_or_default(),
            responder_registry: self.responder_registry.unwrap_or_default(),
            walkers,
            walker_registry,
            last_valid,
        })
    }
}
