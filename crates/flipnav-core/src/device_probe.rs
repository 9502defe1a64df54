//! One-shot capability detection.
//!
//! Everything the resolver needs to know about its host is probed once, at
//! construction, and frozen into a [`DeviceCapabilities`] value. Nothing
//! downstream branches on the environment again.

use crate::platform::Environment;

/// User agent fragments of platforms that are treated as touch devices
/// regardless of what the runtime probes report.
pub const TOUCH_USER_AGENTS: &[&str] = &[
    "iPhone",
    "iPod",
    "iPad",
    "Android",
    "playbook",
    "silk",
    "BlackBerry",
    "BB10",
    "Windows Phone",
    "Tizen",
    "Bada",
    "webOS",
    "IEMobile",
    "Opera Mini",
];

/// Wheel event family, in priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WheelEventName {
    Wheel,
    MouseWheel,
    MozMousePixelScroll,
}

impl WheelEventName {
    pub const PRIORITY: [WheelEventName; 3] = [
        WheelEventName::Wheel,
        WheelEventName::MouseWheel,
        WheelEventName::MozMousePixelScroll,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            WheelEventName::Wheel => "wheel",
            WheelEventName::MouseWheel => "mousewheel",
            WheelEventName::MozMousePixelScroll => "MozMousePixelScroll",
        }
    }
}

/// Touch/pointer event family, in priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TouchEventFamily {
    Pointer,
    MsPointer,
    Touch,
}

impl TouchEventFamily {
    pub fn start(self) -> &'static str {
        match self {
            TouchEventFamily::Pointer => "pointerdown",
            TouchEventFamily::MsPointer => "MSPointerDown",
            TouchEventFamily::Touch => "touchstart",
        }
    }

    pub fn moved(self) -> &'static str {
        match self {
            TouchEventFamily::Pointer => "pointermove",
            TouchEventFamily::MsPointer => "MSPointerMove",
            TouchEventFamily::Touch => "touchmove",
        }
    }
}

/// Event names resolved for this host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedEventNames {
    pub wheel: WheelEventName,
    /// `None` when touch listeners should not be registered at all.
    pub touch: Option<TouchEventFamily>,
}

/// Result of probing the host once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeviceCapabilities {
    /// User agent matched a known touch platform.
    pub touch_user_agent: bool,
    /// Runtime reports touch support (`ontouchstart` or touch points > 0).
    pub touch_runtime: bool,
    pub events: ResolvedEventNames,
}

impl DeviceCapabilities {
    /// Whether touch listeners are registered and touch lists are trusted.
    pub fn touch_enabled(&self) -> bool {
        self.touch_user_agent || self.touch_runtime
    }

    /// Genuine runtime touch capability; decides whether touch lists take
    /// precedence over page coordinates.
    pub fn touch_capable(&self) -> bool {
        self.touch_runtime
    }
}

#[derive(Debug)]
pub struct DeviceProbe;

impl DeviceProbe {
    pub fn probe(environment: &dyn Environment) -> DeviceCapabilities {
        let touch_user_agent = environment
            .user_agent()
            .map(|agent| is_touch_user_agent(&agent))
            .unwrap_or(false);
        let touch_runtime =
            environment.supports_event("touchstart") || environment.max_touch_points() > 0;

        let wheel = resolve_wheel_event(environment);
        let touch = (touch_user_agent || touch_runtime).then(|| resolve_touch_family(environment));

        let capabilities = DeviceCapabilities {
            touch_user_agent,
            touch_runtime,
            events: ResolvedEventNames { wheel, touch },
        };
        log::debug!("probed device capabilities: {capabilities:?}");
        capabilities
    }
}

pub fn is_touch_user_agent(agent: &str) -> bool {
    TOUCH_USER_AGENTS
        .iter()
        .any(|fragment| agent.contains(fragment))
}

/// First supported wheel event; `MozMousePixelScroll` is the unconditional
/// fallback.
pub fn resolve_wheel_event(environment: &dyn Environment) -> WheelEventName {
    WheelEventName::PRIORITY
        .into_iter()
        .find(|name| environment.supports_event(name.as_str()))
        .unwrap_or(WheelEventName::MozMousePixelScroll)
}

pub fn resolve_touch_family(environment: &dyn Environment) -> TouchEventFamily {
    if environment.has_global("PointerEvent") {
        TouchEventFamily::Pointer
    } else if environment.has_global("MSPointerEvent") {
        TouchEventFamily::MsPointer
    } else {
        TouchEventFamily::Touch
    }
}
