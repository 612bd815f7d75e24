//! Application lifecycle.
//!
//! Builds the runtime from a raw configuration and controls polling.

use crate::cli::Action;
use crate::config::{calculate, ConfigError, RawConfig, ZoneConfig};
use crate::diagnostics::Diagnostics;
use crate::monitor::{
    KeystrokeExecutor, ObserverConfig, ObserverError, PointerObserver, SubscriberId,
    ZoneDispatcher,
};
use crate::platform::{Platform, PlatformError};
use std::path::Path;
use std::sync::Arc;

/// Applies the command line actions to `config`, in order.
///
/// The platform is acquired through `acquire` on first use and cached in
/// `platform`, so that storing a configuration never needs input access.
pub fn apply_actions<F>(
    actions: &[Action],
    config: &mut RawConfig,
    path: &Path,
    platform: &mut Option<Platform>,
    acquire: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: Fn() -> Result<Platform, PlatformError>,
{
    for action in actions {
        match action {
            Action::RunCalculation => {
                let native = match platform.take() {
                    Some(native) => native,
                    None => acquire()?,
                };
                let size = native.screen.primary_screen_size();
                *platform = Some(native);

                let (width, height) = size?;
                *config = calculate(config, width, height);
                println!("   ✓ Zones calculated for {}x{}", width, height);
            }
            Action::StoreConfiguration => {
                ZoneConfig::store(path, config)?;
                println!("   ✓ Configuration stored to {}", path.display());
            }
            Action::Exit | Action::Verbose => {}
            Action::Unknown(flag) => {
                tracing::warn!(flag = %flag, "Unknown flag ignored");
                println!("   ⚠ Unknown flag: {}", flag);
            }
        }
    }

    Ok(())
}

/// A configured hot corner session.
pub struct Application {
    observer: PointerObserver,
    dispatcher: Arc<ZoneDispatcher>,
    subscription: SubscriberId,
}

impl Application {
    /// Builds the observer and dispatcher from `config`.
    ///
    /// The `delay` option sets the poll interval; every zone entry is
    /// parsed into the dispatcher's zone map.
    pub fn new(
        mut config: RawConfig,
        platform: &Platform,
        diagnostics: Diagnostics,
    ) -> Result<Self, ConfigError> {
        let poll_interval = ZoneConfig::take_delay(&mut config)?;
        let zones = ZoneConfig::parse(&config)?;
        tracing::info!(
            zones = zones.len(),
            delay_ms = poll_interval.as_millis() as u64,
            "Configuration parsed"
        );

        let executor = KeystrokeExecutor::new(Arc::clone(&platform.keyboard), diagnostics);
        let dispatcher = Arc::new(ZoneDispatcher::new(zones, executor, diagnostics));

        let observer = PointerObserver::new(
            Arc::clone(&platform.pointer),
            ObserverConfig { poll_interval },
        );
        let subscription = observer.add_subscriber(dispatcher.clone());

        Ok(Self {
            observer,
            dispatcher,
            subscription,
        })
    }

    pub fn dispatcher(&self) -> &ZoneDispatcher {
        &self.dispatcher
    }

    pub fn observer(&self) -> &PointerObserver {
        &self.observer
    }

    /// Starts polling the pointer.
    pub fn start(&self) -> Result<(), ObserverError> {
        self.observer.start()?;
        tracing::info!("Hot corners active");
        Ok(())
    }

    /// Stops polling; a dispatch already in progress completes.
    pub fn stop(&self) {
        self.observer.stop();
        tracing::info!("Hot corners stopped");
    }
}

impl Drop for Application {
    fn drop(&mut self) {
        self.observer.remove_subscriber(self.subscription);
    }
}
