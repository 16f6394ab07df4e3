use std::cell::RefCell;
use std::rc::Rc;

/// Stable handle to a token slot inside a notifier's arena.
///
/// The generation counter guards against slot reuse: a disposed handle can
/// never observe a token that later recycled its slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct TokenHandle {
    index: u32,
    generation: u32,
}

#[derive(Clone, Copy, Debug)]
struct Slot {
    generation: u32,
    live: bool,
    signaled: bool,
}

#[derive(Debug, Default)]
struct NotifierInner {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl NotifierInner {
    fn slot_mut(&mut self, handle: TokenHandle) -> Option<&mut Slot> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|s| s.live && s.generation == handle.generation)
    }
}

/// Edge-triggered change fan-out owned by a mutable subject.
///
/// A notifier hands out [`ChangeToken`]s via [`ChangeNotifier::register`];
/// the subject calls [`ChangeNotifier::broadcast`] after each logical
/// mutation, which flips every live token to signaled. Each token is owned
/// by one consumer and polled at that consumer's own cadence.
///
/// Tokens live in an arena indexed by generational handles with a free-list,
/// so registration and disposal are O(1) amortized and disposal never shifts
/// other tokens. Single-threaded by design; the shared state is `Rc`-backed
/// and there is no internal locking.
#[derive(Debug, Default)]
pub struct ChangeNotifier {
    inner: Rc<RefCell<NotifierInner>>,
}

impl ChangeNotifier {
    /// Create a notifier with no registered tokens.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new unsignaled token.
    pub fn register(&self) -> ChangeToken {
        let mut inner = self.inner.borrow_mut();
        let handle = match inner.free.pop() {
            Some(index) => {
                let slot = &mut inner.slots[index as usize];
                slot.live = true;
                slot.signaled = false;
                TokenHandle {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                let index = inner.slots.len() as u32;
                inner.slots.push(Slot {
                    generation: 0,
                    live: true,
                    signaled: false,
                });
                TokenHandle {
                    index,
                    generation: 0,
                }
            }
        };
        drop(inner);

        ChangeToken {
            inner: Rc::clone(&self.inner),
            handle,
        }
    }

    /// Signal every live token.
    ///
    /// O(n) in live token count; touching a token is idempotent until its
    /// consumer clears the signal via [`ChangeToken::consume`].
    pub fn broadcast(&self) {
        let mut inner = self.inner.borrow_mut();
        for slot in inner.slots.iter_mut().filter(|s| s.live) {
            slot.signaled = true;
        }
    }

    /// Number of currently registered (undisposed) tokens.
    pub fn live_tokens(&self) -> usize {
        self.inner.borrow().slots.iter().filter(|s| s.live).count()
    }
}

/// Consumer-held receipt for change broadcasts from one [`ChangeNotifier`].
///
/// Consuming is edge-triggered: [`ChangeToken::consume`] reads and clears
/// the signaled state, so an unpolled token simply retains the condition.
/// Dropping a token disposes it, which keeps teardown order-independent --
/// a token may outlive its notifier's subject and remains a benign no-op.
#[derive(Debug)]
pub struct ChangeToken {
    inner: Rc<RefCell<NotifierInner>>,
    handle: TokenHandle,
}

impl ChangeToken {
    /// Read and clear the signaled state, returning its prior value.
    ///
    /// Always `false` after disposal.
    pub fn consume(&mut self) -> bool {
        let mut inner = self.inner.borrow_mut();
        match inner.slot_mut(self.handle) {
            Some(slot) => std::mem::take(&mut slot.signaled),
            None => false,
        }
    }

    /// Whether a broadcast is pending, without clearing it.
    pub fn is_signaled(&self) -> bool {
        let inner = self.inner.borrow();
        inner
            .slots
            .get(self.handle.index as usize)
            .filter(|s| s.live && s.generation == self.handle.generation)
            .is_some_and(|s| s.signaled)
    }

    /// Remove this token from its notifier's live set.
    ///
    /// O(1); safe to call repeatedly, and subsequent [`ChangeToken::consume`]
    /// calls return `false`. After disposal the token no longer receives
    /// broadcasts.
    pub fn dispose(&mut self) {
        let mut inner = self.inner.borrow_mut();
        let Some(slot) = inner.slots.get_mut(self.handle.index as usize) else {
            return;
        };
        if !slot.live || slot.generation != self.handle.generation {
            return;
        }
        slot.live = false;
        slot.signaled = false;
        slot.generation = slot.generation.wrapping_add(1);
        inner.free.push(self.handle.index);
    }
}

impl Drop for ChangeToken {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/notify/change.rs"]
mod tests;
