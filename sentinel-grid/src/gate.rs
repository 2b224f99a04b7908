use core::cell::Cell;

/// Identifies one armed refresh. Tickets are never reused within a [`Debouncer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RefreshTicket(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Pending {
    ticket: RefreshTicket,
    due_ms: u64,
}

/// A cancel-and-reschedule timer driven by the host's clock.
///
/// The debouncer holds at most one pending refresh. Arming always cancels the previous one, and
/// a ticket fires at most once: after it fired or was cancelled, `poll` never returns it again.
///
/// Time is supplied by the caller (`now_ms`), so the same type works with a real timer (poll on
/// every timer tick) and with a virtual clock in tests.
#[derive(Clone, Debug)]
pub struct Debouncer {
    delay_ms: u64,
    pending: Cell<Option<Pending>>,
    next_ticket: Cell<u64>,
}

impl Debouncer {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: Cell::new(None),
            next_ticket: Cell::new(1),
        }
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Cancels any pending refresh and arms a new one due at `now_ms + delay_ms`.
    pub fn arm(&self, now_ms: u64) -> RefreshTicket {
        let ticket = RefreshTicket(self.next_ticket.get());
        self.next_ticket.set(ticket.0.wrapping_add(1));
        if self.pending.get().is_some() {
            glog!(trace, "Debouncer: cancel superseded refresh");
        }
        let due_ms = now_ms.saturating_add(self.delay_ms);
        self.pending.set(Some(Pending { ticket, due_ms }));
        glog!(trace, ticket = ticket.0, due_ms, "Debouncer::arm");
        ticket
    }

    /// Cancels the pending refresh, if any. Idempotent.
    pub fn cancel(&self) -> Option<RefreshTicket> {
        let prev = self.pending.take().map(|p| p.ticket);
        if let Some(_ticket) = prev {
            glog!(trace, ticket = _ticket.0, "Debouncer::cancel");
        }
        prev
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get().is_some()
    }

    pub fn pending_ticket(&self) -> Option<RefreshTicket> {
        self.pending.get().map(|p| p.ticket)
    }

    pub fn due_ms(&self) -> Option<u64> {
        self.pending.get().map(|p| p.due_ms)
    }

    /// Fires the pending refresh if it is due. Returns its ticket exactly once.
    pub fn poll(&self, now_ms: u64) -> Option<RefreshTicket> {
        let pending = self.pending.get()?;
        if now_ms < pending.due_ms {
            return None;
        }
        self.pending.set(None);
        glog!(trace, ticket = pending.ticket.0, now_ms, "Debouncer: fire");
        Some(pending.ticket)
    }
}

/// Serializes range updates and coalesces them into one debounced refresh.
///
/// A single "update in progress" flag guards the entry point: a signal that arrives while an
/// update runs is dropped, not queued. The flag lives in a [`Cell`] so reentrant calls through a
/// shared reference observe it, and it is released by a drop guard so a panicking update cannot
/// leave the gate closed.
///
/// The flag is only adequate for a single logical thread. Hosts that drive a grid from several
/// threads must wrap it in their own lock.
#[derive(Clone, Debug)]
pub struct ScrollGate {
    in_progress: Cell<bool>,
    debouncer: Debouncer,
}

/// Releases the gate when dropped.
pub struct GateGuard<'a> {
    flag: &'a Cell<bool>,
}

impl Drop for GateGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

impl ScrollGate {
    pub fn new(refresh_delay_ms: u64) -> Self {
        Self {
            in_progress: Cell::new(false),
            debouncer: Debouncer::new(refresh_delay_ms),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_progress.get()
    }

    pub fn debouncer(&self) -> &Debouncer {
        &self.debouncer
    }

    /// Closes the gate. Returns `None` if it is already closed.
    pub fn try_enter(&self) -> Option<GateGuard<'_>> {
        if self.in_progress.replace(true) {
            return None;
        }
        Some(GateGuard {
            flag: &self.in_progress,
        })
    }

    /// Runs `update` under the gate.
    ///
    /// - If the gate is closed, `update` is not called and `None` is returned.
    /// - If `update` returns `Some`, the pending refresh is replaced by a new one armed at
    ///   `now_ms`.
    /// - The gate reopens when this returns or unwinds.
    pub fn run<T>(&self, now_ms: u64, update: impl FnOnce() -> Option<T>) -> Option<GateRun<T>> {
        let Some(_guard) = self.try_enter() else {
            glog!(debug, now_ms, "ScrollGate: update in progress, dropping signal");
            return None;
        };
        let out = match update() {
            Some(value) => GateRun::Changed {
                value,
                ticket: self.debouncer.arm(now_ms),
            },
            None => GateRun::Unchanged,
        };
        Some(out)
    }

    /// Fires the debounced refresh if it is due.
    pub fn poll_refresh(&self, now_ms: u64) -> Option<RefreshTicket> {
        self.debouncer.poll(now_ms)
    }

    pub fn cancel_refresh(&self) -> Option<RefreshTicket> {
        self.debouncer.cancel()
    }
}

/// What happened inside an admitted [`ScrollGate::run`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateRun<T> {
    Changed { value: T, ticket: RefreshTicket },
    Unchanged,
}
