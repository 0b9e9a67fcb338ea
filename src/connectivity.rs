use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};
#[cfg(feature = "network")]
use std::time::Duration;

/// Platform reachability check. The production probe lives behind the
/// `network` feature; without it the app assumes it is online.
pub trait ConnectivityProbe: Send {
    fn is_online(&self) -> bool;
}

type Listener = Box<dyn FnMut(bool) + Send>;

struct ListenerTable {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

struct MonitorInner {
    online: AtomicBool,
    listeners: Mutex<ListenerTable>,
}

/// Process-wide online/offline state. The probe thread writes through
/// [`ConnectivityMonitor::report`]; sessions hold clones and only read.
///
/// Cloning is cheap; every clone observes the same state.
#[derive(Clone)]
pub struct ConnectivityMonitor {
    inner: Arc<MonitorInner>,
}

impl ConnectivityMonitor {
    pub fn new(initial: bool) -> Self {
        Self {
            inner: Arc::new(MonitorInner {
                online: AtomicBool::new(initial),
                listeners: Mutex::new(ListenerTable {
                    next_id: 0,
                    entries: Vec::new(),
                }),
            }),
        }
    }

    /// Sample the environment once for the startup state.
    pub fn with_probe(probe: &dyn ConnectivityProbe) -> Self {
        Self::new(probe.is_online())
    }

    /// Last observed state. With no probe reports yet, the initial sample.
    pub fn current(&self) -> bool {
        self.inner.online.load(Ordering::SeqCst)
    }

    /// Record an environment observation. Listeners fire synchronously on
    /// transitions only; repeating the current state is a no-op.
    pub fn report(&self, online: bool) {
        let mut table = match self.inner.listeners.lock() {
            Ok(table) => table,
            Err(poisoned) => poisoned.into_inner(),
        };
        let previous = self.inner.online.swap(online, Ordering::SeqCst);
        if previous == online {
            return;
        }
        for (_, listener) in table.entries.iter_mut() {
            listener(online);
        }
    }

    /// Register a transition listener. The returned [`Subscription`]
    /// deregisters it when dropped.
    #[must_use = "dropping the subscription immediately deregisters the listener"]
    pub fn subscribe(&self, listener: impl FnMut(bool) + Send + 'static) -> Subscription {
        let mut table = match self.inner.listeners.lock() {
            Ok(table) => table,
            Err(poisoned) => poisoned.into_inner(),
        };
        let id = table.next_id;
        table.next_id += 1;
        table.entries.push((id, Box::new(listener)));
        Subscription {
            inner: Arc::downgrade(&self.inner),
            id,
        }
    }

    #[cfg(test)]
    fn listener_count(&self) -> usize {
        self.inner
            .listeners
            .lock()
            .map(|table| table.entries.len())
            .unwrap_or(0)
    }
}

/// RAII handle for a registered listener.
pub struct Subscription {
    inner: Weak<MonitorInner>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            if let Ok(mut table) = inner.listeners.lock() {
                table.entries.retain(|(id, _)| *id != self.id);
            }
        }
    }
}

/// Reachability probe that issues a HEAD request against a captive-portal
/// style endpoint. Any response counts as online; only transport failure
/// counts as offline.
#[cfg(feature = "network")]
pub struct HttpProbe {
    client: reqwest::blocking::Client,
    url: String,
}

#[cfg(feature = "network")]
impl HttpProbe {
    pub fn new(url: &str, timeout: Duration) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self {
            client,
            url: url.to_string(),
        }
    }
}

#[cfg(feature = "network")]
impl ConnectivityProbe for HttpProbe {
    fn is_online(&self) -> bool {
        self.client.head(&self.url).send().is_ok()
    }
}

/// Fallback probe when the `network` feature is disabled.
pub struct AlwaysOnline;

impl ConnectivityProbe for AlwaysOnline {
    fn is_online(&self) -> bool {
        true
    }
}
