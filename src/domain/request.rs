// SPDX-License-Identifier: MPL-2.0
//! Immutable notification requests.
//!
//! A [`Request`] is the producer-facing input to the engine: built once,
//! submitted, never mutated afterwards. The convenience constructors cover
//! the common game events (resource gains, combat results, achievements)
//! and are pure request builders with no state of their own.

use std::fmt;
use std::rc::Rc;

use super::channel_key::ChannelKey;
use super::kind::Kind;
use super::timing::DisplayDuration;

/// Unique identifier for a notification request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(u64);

impl RequestId {
    /// Creates a new unique request ID.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

/// Opaque reference to an icon asset. The engine carries it to the bound
/// instance and clears it on reclaim; it never interprets the key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconRef(String);

impl IconRef {
    /// Creates an icon reference from an asset key.
    pub fn new(asset_key: impl Into<String>) -> Self {
        Self(asset_key.into())
    }

    /// Returns the asset key.
    #[must_use]
    pub fn asset_key(&self) -> &str {
        &self.0
    }
}

/// RGBA background-color override for a single notification card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl BackgroundColor {
    /// Blue tint used by informational toasts.
    pub const INFO: Self = Self::rgb(0.16, 0.44, 0.80);
    /// Green tint used by success toasts.
    pub const SUCCESS: Self = Self::rgb(0.18, 0.60, 0.33);
    /// Orange tint used by warning toasts.
    pub const WARNING: Self = Self::rgb(0.85, 0.56, 0.13);
    /// Red tint used by error toasts.
    pub const ERROR: Self = Self::rgb(0.78, 0.22, 0.20);

    /// Creates an opaque color from RGB components.
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

/// Callback invoked when the user clicks a visible notification.
#[derive(Clone)]
pub struct ClickAction(Rc<dyn Fn()>);

impl ClickAction {
    /// Wraps a callback.
    pub fn new(action: impl Fn() + 'static) -> Self {
        Self(Rc::new(action))
    }

    /// Invokes the callback.
    pub fn invoke(&self) {
        (self.0)();
    }
}

impl fmt::Debug for ClickAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClickAction(..)")
    }
}

/// An immutable notification request.
///
/// Producers build a request, hand it to
/// [`Dispatcher::submit`](crate::engine::Dispatcher::submit), and forget it.
/// Delivery is best-effort: the engine never reports failure back.
#[derive(Debug, Clone)]
pub struct Request {
    id: RequestId,
    kind: Kind,
    channel: Option<ChannelKey>,
    title: Option<String>,
    message: String,
    subtitle: Option<String>,
    icon: Option<IconRef>,
    background: Option<BackgroundColor>,
    duration: DisplayDuration,
    play_sound: bool,
    on_click: Option<ClickAction>,
}

impl Request {
    /// Creates a request of the given kind with the kind's default channel,
    /// duration, and no sound.
    pub fn new(kind: Kind, message: impl Into<String>) -> Self {
        Self {
            id: RequestId::new(),
            kind,
            channel: None,
            title: None,
            message: message.into(),
            subtitle: None,
            icon: None,
            background: None,
            duration: kind.default_duration(),
            play_sound: false,
            on_click: None,
        }
    }

    // ==========================================================================
    // Producer convenience constructors
    // ==========================================================================

    /// Informational toast.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Kind::Standard, message).with_background(BackgroundColor::INFO)
    }

    /// Success toast.
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Kind::Standard, message).with_background(BackgroundColor::SUCCESS)
    }

    /// Warning toast; stays up slightly longer than the standard default.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Kind::Standard, message)
            .with_background(BackgroundColor::WARNING)
            .with_duration(DisplayDuration::from_secs(6.0))
    }

    /// Error toast; persists until explicitly dismissed.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Kind::Standard, message)
            .with_background(BackgroundColor::ERROR)
            .with_duration(DisplayDuration::persistent())
    }

    /// Resource gain, e.g. "+250 Gold".
    pub fn resource_gain(resource: impl Into<String>, amount: i64) -> Self {
        Self::new(Kind::Resource, format!("+{} {}", amount, resource.into()))
    }

    /// Resource expenditure, e.g. "-80 Wood".
    pub fn resource_spent(resource: impl Into<String>, amount: i64) -> Self {
        Self::new(Kind::Resource, format!("-{} {}", amount, resource.into()))
    }

    /// Combat outcome summary.
    pub fn combat_result(summary: impl Into<String>) -> Self {
        Self::new(Kind::Combat, summary).with_title("Combat report")
    }

    /// Quest completion.
    pub fn quest_complete(quest_name: impl Into<String>) -> Self {
        Self::new(Kind::Achievement, quest_name)
            .with_title("Quest complete")
            .with_sound(true)
    }

    /// Achievement unlock.
    pub fn achievement(name: impl Into<String>) -> Self {
        Self::new(Kind::Achievement, name)
            .with_title("Achievement unlocked")
            .with_sound(true)
    }

    /// Level-up banner.
    pub fn level_up(level: u32) -> Self {
        Self::new(Kind::Achievement, format!("Level {} reached", level)).with_sound(true)
    }

    /// Alliance chat/system message; persists until read.
    pub fn alliance_message(sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(Kind::System, text).with_title(sender)
    }

    // ==========================================================================
    // Builder methods
    // ==========================================================================

    /// Sets the title line.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the subtitle line.
    #[must_use]
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Sets the icon reference.
    #[must_use]
    pub fn with_icon(mut self, icon: IconRef) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Overrides the card background color.
    #[must_use]
    pub fn with_background(mut self, color: BackgroundColor) -> Self {
        self.background = Some(color);
        self
    }

    /// Targets a specific channel instead of the kind's default.
    #[must_use]
    pub fn with_channel(mut self, channel: ChannelKey) -> Self {
        self.channel = Some(channel);
        self
    }

    /// Overrides the display duration.
    #[must_use]
    pub fn with_duration(mut self, duration: DisplayDuration) -> Self {
        self.duration = duration;
        self
    }

    /// Sets whether the engine emits a sound cue on admission.
    #[must_use]
    pub fn with_sound(mut self, play_sound: bool) -> Self {
        self.play_sound = play_sound;
        self
    }

    /// Attaches a click callback.
    #[must_use]
    pub fn on_click(mut self, action: impl Fn() + 'static) -> Self {
        self.on_click = Some(ClickAction::new(action));
        self
    }

    // ==========================================================================
    // Accessors
    // ==========================================================================

    /// Returns the request's unique ID.
    #[must_use]
    pub fn id(&self) -> RequestId {
        self.id
    }

    /// Returns the notification kind.
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Returns the target channel: the explicit override if one was set,
    /// otherwise the kind's default.
    #[must_use]
    pub fn channel(&self) -> ChannelKey {
        self.channel.unwrap_or_else(|| self.kind.default_channel())
    }

    /// Returns the title line, if any.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the message body.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the subtitle line, if any.
    #[must_use]
    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    /// Returns the icon reference, if any.
    #[must_use]
    pub fn icon(&self) -> Option<&IconRef> {
        self.icon.as_ref()
    }

    /// Returns the background override, if any.
    #[must_use]
    pub fn background(&self) -> Option<BackgroundColor> {
        self.background
    }

    /// Returns the display duration.
    #[must_use]
    pub fn duration(&self) -> DisplayDuration {
        self.duration
    }

    /// Returns whether a sound cue should accompany admission.
    #[must_use]
    pub fn play_sound(&self) -> bool {
        self.play_sound
    }

    /// Returns the click callback, if any.
    #[must_use]
    pub fn click_action(&self) -> Option<&ClickAction> {
        self.on_click.as_ref()
    }
}
