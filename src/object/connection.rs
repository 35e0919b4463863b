//! Connect, disconnect and emit.
//!
//! A connection is one callable in a [`SlotTable`](crate::dispatch::SlotTable)
//! plus a `(signal, handle)` entry in the emitter's connection cache. When the
//! slot has a receiver other than the emitter, the receiver also records the
//! handle as owned, so that destroying either side releases the callable.
//! Entries whose callable is gone are pruned the next time the signal fires.

use smallvec::SmallVec;

use super::component::Component;
use super::graph::{ObjectGraph, ObjectId};
use crate::dispatch::{Callable, Checkout, Handle};
use crate::error::GraphError;
use crate::meta::{HashedName, Signal, Var};

impl ObjectGraph {
    // -----------------------------------------------------------------------
    // Connect
    // -----------------------------------------------------------------------

    /// Connect a free slot to `signal` of `emitter`.
    ///
    /// # Panics
    ///
    /// Panics if `signal` is null or `emitter` does not exist.
    pub fn connect<F>(&mut self, emitter: ObjectId, signal: Signal, slot: F) -> Handle
    where
        F: FnMut(&mut ObjectGraph, &[Var]) + 'static,
    {
        self.connect_callable(emitter, signal, None, Callable::Free(Box::new(slot)))
    }

    /// Connect a free slot owned by `receiver`: destroying the receiver
    /// disconnects the slot.
    pub fn connect_to<F>(
        &mut self,
        emitter: ObjectId,
        signal: Signal,
        receiver: ObjectId,
        slot: F,
    ) -> Handle
    where
        F: FnMut(&mut ObjectGraph, &[Var]) + 'static,
    {
        self.connect_callable(
            emitter,
            signal,
            Some(receiver),
            Callable::Free(Box::new(slot)),
        )
    }

    /// Connect a member slot: `slot` runs on the `C` component of `receiver`.
    ///
    /// # Panics
    ///
    /// Panics if `signal` is null, either object does not exist, or the
    /// receiver has no component of type `C`.
    pub fn connect_member<C, F>(
        &mut self,
        emitter: ObjectId,
        signal: Signal,
        receiver: ObjectId,
        slot: F,
    ) -> Handle
    where
        C: Component,
        F: FnMut(&mut C, &[Var]) + 'static,
    {
        self.try_connect_member(emitter, signal, receiver, slot)
            .unwrap_or_else(|err| panic!("cannot connect member slot: {err}"))
    }

    /// Checked variant of [`ObjectGraph::connect_member`].
    pub fn try_connect_member<C, F>(
        &mut self,
        emitter: ObjectId,
        signal: Signal,
        receiver: ObjectId,
        mut slot: F,
    ) -> Result<Handle, GraphError>
    where
        C: Component,
        F: FnMut(&mut C, &[Var]) + 'static,
    {
        if !signal.is_valid() {
            return Err(GraphError::UnknownSignal(signal.name()));
        }
        if !self.contains(emitter) {
            return Err(GraphError::UnknownObject(emitter));
        }
        if !self.contains(receiver) {
            return Err(GraphError::UnknownObject(receiver));
        }
        if self.component::<C>(receiver).is_none() {
            return Err(GraphError::ComponentMismatch(receiver));
        }
        let callable = Callable::Member(Box::new(
            move |component: &mut dyn Component, args: &[Var]| -> bool {
                match component.as_any_mut().downcast_mut::<C>() {
                    Some(component) => {
                        slot(component, args);
                        true
                    }
                    None => false,
                }
            },
        ));
        Ok(self.connect_callable(emitter, signal, Some(receiver), callable))
    }

    /// Connect a free slot to the signal of `emitter` named `name`.
    ///
    /// # Panics
    ///
    /// Panics if the emitter has no such signal.
    pub fn connect_by_name<F>(&mut self, emitter: ObjectId, name: HashedName, slot: F) -> Handle
    where
        F: FnMut(&mut ObjectGraph, &[Var]) + 'static,
    {
        self.try_connect_by_name(emitter, name, slot)
            .unwrap_or_else(|err| panic!("cannot connect: {err}"))
    }

    /// Checked variant of [`ObjectGraph::connect_by_name`].
    pub fn try_connect_by_name<F>(
        &mut self,
        emitter: ObjectId,
        name: HashedName,
        slot: F,
    ) -> Result<Handle, GraphError>
    where
        F: FnMut(&mut ObjectGraph, &[Var]) + 'static,
    {
        let signal = self.resolve_signal(emitter, name)?;
        Ok(self.connect(emitter, signal, slot))
    }

    /// Connect a free slot owned by `receiver` to the signal of `emitter`
    /// named `name`.
    ///
    /// # Panics
    ///
    /// Panics if either object does not exist or the emitter has no such signal.
    pub fn connect_to_by_name<F>(
        &mut self,
        emitter: ObjectId,
        name: HashedName,
        receiver: ObjectId,
        slot: F,
    ) -> Handle
    where
        F: FnMut(&mut ObjectGraph, &[Var]) + 'static,
    {
        self.try_connect_to_by_name(emitter, name, receiver, slot)
            .unwrap_or_else(|err| panic!("cannot connect: {err}"))
    }

    /// Checked variant of [`ObjectGraph::connect_to_by_name`].
    pub fn try_connect_to_by_name<F>(
        &mut self,
        emitter: ObjectId,
        name: HashedName,
        receiver: ObjectId,
        slot: F,
    ) -> Result<Handle, GraphError>
    where
        F: FnMut(&mut ObjectGraph, &[Var]) + 'static,
    {
        let signal = self.resolve_signal(emitter, name)?;
        if !self.contains(receiver) {
            return Err(GraphError::UnknownObject(receiver));
        }
        Ok(self.connect_to(emitter, signal, receiver, slot))
    }

    /// Connect a member slot of `receiver` to the signal of `emitter` named
    /// `name`.
    ///
    /// # Panics
    ///
    /// Panics if either object does not exist, the emitter has no such signal,
    /// or the receiver has no component of type `C`.
    pub fn connect_member_by_name<C, F>(
        &mut self,
        emitter: ObjectId,
        name: HashedName,
        receiver: ObjectId,
        slot: F,
    ) -> Handle
    where
        C: Component,
        F: FnMut(&mut C, &[Var]) + 'static,
    {
        self.try_connect_member_by_name(emitter, name, receiver, slot)
            .unwrap_or_else(|err| panic!("cannot connect member slot: {err}"))
    }

    /// Checked variant of [`ObjectGraph::connect_member_by_name`].
    pub fn try_connect_member_by_name<C, F>(
        &mut self,
        emitter: ObjectId,
        name: HashedName,
        receiver: ObjectId,
        slot: F,
    ) -> Result<Handle, GraphError>
    where
        C: Component,
        F: FnMut(&mut C, &[Var]) + 'static,
    {
        let signal = self.resolve_signal(emitter, name)?;
        self.try_connect_member(emitter, signal, receiver, slot)
    }

    fn resolve_signal(&self, emitter: ObjectId, name: HashedName) -> Result<Signal, GraphError> {
        if !self.contains(emitter) {
            return Err(GraphError::UnknownObject(emitter));
        }
        let signal = self.find_signal(emitter, name);
        if !signal.is_valid() {
            return Err(GraphError::UnknownSignal(name));
        }
        Ok(signal)
    }

    /// Connect one slot to several `(emitter, signal)` pairs.
    ///
    /// The callable is stored once, in the receiver's slot table, and owned by
    /// `receiver` whenever one of the emitters is another object. Disconnect it
    /// with [`ObjectGraph::disconnect_multiple`].
    pub fn connect_multiple<F>(
        &mut self,
        pairs: &[(ObjectId, Signal)],
        receiver: ObjectId,
        slot: F,
    ) -> Handle
    where
        F: FnMut(&mut ObjectGraph, &[Var]) + 'static,
    {
        assert!(self.contains(receiver), "receiver {receiver:?} does not exist");
        for &(emitter, signal) in pairs {
            assert!(signal.is_valid(), "cannot connect to a null signal");
            assert!(self.contains(emitter), "emitter {emitter:?} does not exist");
        }

        let table = self.ensure_cache(receiver).table();
        let key = self.tables[table].insert(Some(receiver), Callable::Free(Box::new(slot)));
        let handle = Handle::new(table, key);
        for &(emitter, signal) in pairs {
            self.ensure_cache(emitter).register(signal, handle);
        }
        if pairs.iter().any(|&(emitter, _)| emitter != receiver) {
            self.ensure_cache(receiver).own(handle);
        }
        log::trace!(
            "connected {handle:?} to {} signal(s) for {receiver:?}",
            pairs.len()
        );
        handle
    }

    fn connect_callable(
        &mut self,
        emitter: ObjectId,
        signal: Signal,
        receiver: Option<ObjectId>,
        callable: Callable,
    ) -> Handle {
        assert!(signal.is_valid(), "cannot connect to a null signal");
        assert!(self.contains(emitter), "emitter {emitter:?} does not exist");
        if let Some(receiver) = receiver {
            assert!(self.contains(receiver), "receiver {receiver:?} does not exist");
        }

        let table = self.ensure_cache(emitter).table();
        let key = self.tables[table].insert(receiver, callable);
        let handle = Handle::new(table, key);
        self.ensure_cache(emitter).register(signal, handle);
        if let Some(receiver) = receiver.filter(|&receiver| receiver != emitter) {
            self.ensure_cache(receiver).own(handle);
        }
        log::trace!("connected {handle:?} to {signal:?} of {emitter:?}");
        handle
    }

    // -----------------------------------------------------------------------
    // Disconnect
    // -----------------------------------------------------------------------

    /// Remove the `(signal, handle)` entry of `emitter` and release the slot.
    /// Returns `false` if there was no such entry.
    pub fn disconnect(&mut self, emitter: ObjectId, signal: Signal, handle: Handle) -> bool {
        let removed = self
            .cache_mut(emitter)
            .is_some_and(|cache| cache.unregister(signal, handle));
        if removed {
            self.release(handle);
        }
        removed
    }

    /// Like [`ObjectGraph::disconnect`], also forgetting the handle in the
    /// owned set of `receiver`.
    pub fn disconnect_receiver(
        &mut self,
        emitter: ObjectId,
        signal: Signal,
        handle: Handle,
        receiver: ObjectId,
    ) -> bool {
        let removed = self.disconnect(emitter, signal, handle);
        if removed {
            if let Some(cache) = self.cache_mut(receiver) {
                cache.disown(handle);
            }
        }
        removed
    }

    /// Disconnect every slot of `signal` on `emitter`. Returns the number of
    /// entries removed.
    pub fn disconnect_signal(&mut self, emitter: ObjectId, signal: Signal) -> usize {
        let handles = match self.cache_mut(emitter) {
            Some(cache) => cache.unregister_signal(signal),
            None => return 0,
        };
        for &handle in &handles {
            self.release(handle);
        }
        handles.len()
    }

    /// Disconnect every slot of the signal of `emitter` named `name`.
    pub fn disconnect_by_name(&mut self, emitter: ObjectId, name: HashedName) -> usize {
        let signal = self.find_signal(emitter, name);
        if !signal.is_valid() {
            log::warn!("{emitter:?} has no signal named {name:#010x}");
            return 0;
        }
        self.disconnect_signal(emitter, signal)
    }

    /// Undo [`ObjectGraph::connect_multiple`]. Returns the number of entries
    /// removed.
    pub fn disconnect_multiple(
        &mut self,
        pairs: &[(ObjectId, Signal)],
        handle: Handle,
        receiver: ObjectId,
    ) -> usize {
        let mut removed = 0;
        for &(emitter, signal) in pairs {
            if self
                .cache_mut(emitter)
                .is_some_and(|cache| cache.unregister(signal, handle))
            {
                removed += 1;
            }
        }
        self.release(handle);
        if let Some(cache) = self.cache_mut(receiver) {
            cache.disown(handle);
        }
        removed
    }

    /// Release every slot `object` registered as emitter or owns as receiver.
    ///
    /// Entries left behind in other emitters' caches are pruned on their next
    /// emission. Returns the number of slots released.
    pub fn disconnect_all(&mut self, object: ObjectId) -> usize {
        let handles = match self.cache_mut(object) {
            Some(cache) => cache.take_all(),
            None => return 0,
        };
        handles
            .into_iter()
            .filter(|&handle| self.release(handle))
            .count()
    }

    /// Remove a callable from its table and from its receiver's owned set.
    fn release(&mut self, handle: Handle) -> bool {
        let Some(table) = self.tables.get_mut(handle.table()) else {
            return false;
        };
        let receiver = table.receiver(handle.key());
        if !table.remove(handle.key()) {
            return false;
        }
        if let Some(cache) = receiver.and_then(|receiver| self.cache_mut(receiver)) {
            cache.disown(handle);
        }
        log::trace!("released {handle:?}");
        true
    }

    // -----------------------------------------------------------------------
    // Emit
    // -----------------------------------------------------------------------

    /// Invoke every slot connected to `signal` of `object`, in connection order.
    ///
    /// The slots invoked are those connected when the emission starts. Entries
    /// whose slot is gone, or whose receiver was destroyed, are removed once
    /// every slot has run.
    ///
    /// # Panics
    ///
    /// Panics if `signal` is null. Debug builds also panic when `args` does
    /// not match the signal's argument count.
    pub fn emit(&mut self, object: ObjectId, signal: Signal, args: &[Var]) {
        assert!(signal.is_valid(), "cannot emit a null signal");
        debug_assert_eq!(
            args.len(),
            signal.args_count(),
            "argument count mismatch emitting {signal:?}"
        );

        let handles = match self.connection_cache(object) {
            Some(cache) => cache.matching(signal),
            None => return,
        };
        let mut stale: SmallVec<[Handle; 4]> = SmallVec::new();
        for handle in handles {
            if !self.invoke(handle, args) {
                stale.push(handle);
            }
        }
        if stale.is_empty() {
            return;
        }
        if let Some(cache) = self.cache_mut(object) {
            let pruned = cache.prune(signal, &stale);
            log::trace!("pruned {pruned} stale connection(s) of {signal:?} on {object:?}");
        }
    }

    /// Emit the signal of `object` named `name`.
    ///
    /// # Panics
    ///
    /// Panics if the object has no such signal.
    pub fn emit_by_name(&mut self, object: ObjectId, name: HashedName, args: &[Var]) {
        let signal = self.find_signal(object, name);
        assert!(signal.is_valid(), "{object:?} has no signal named {name:#010x}");
        self.emit(object, signal, args);
    }

    /// Checked variant of [`ObjectGraph::emit`].
    pub fn try_emit(
        &mut self,
        object: ObjectId,
        signal: Signal,
        args: &[Var],
    ) -> Result<(), GraphError> {
        if !self.contains(object) {
            return Err(GraphError::UnknownObject(object));
        }
        if !signal.is_valid() {
            return Err(GraphError::UnknownSignal(signal.name()));
        }
        if args.len() != signal.args_count() {
            return Err(GraphError::ArgumentCount {
                expected: signal.args_count(),
                got: args.len(),
            });
        }
        self.emit(object, signal, args);
        Ok(())
    }

    /// Checked variant of [`ObjectGraph::emit_by_name`].
    pub fn try_emit_by_name(
        &mut self,
        object: ObjectId,
        name: HashedName,
        args: &[Var],
    ) -> Result<(), GraphError> {
        let signal = self.resolve_signal(object, name)?;
        self.try_emit(object, signal, args)
    }

    /// Call the slot behind `handle` directly.
    ///
    /// Returns `false` when the slot is gone, its receiver was destroyed, or
    /// the receiver's component no longer has the slot's type; the slot is
    /// then released. A slot that is already running further up the stack is
    /// skipped and reported as a success.
    pub fn invoke(&mut self, handle: Handle, args: &[Var]) -> bool {
        let Some(table) = self.tables.get_mut(handle.table()) else {
            return false;
        };
        let (callable, receiver) = match table.checkout(handle.key()) {
            Checkout::Missing => return false,
            Checkout::Busy => {
                log::trace!("skipped re-entrant call of {handle:?}");
                return true;
            }
            Checkout::Ready { callable, receiver } => (callable, receiver),
        };

        if receiver.is_some_and(|receiver| !self.contains(receiver)) {
            drop(callable);
            self.release(handle);
            return false;
        }

        let (callable, ok) = match callable {
            Callable::Free(mut slot) => {
                slot(self, args);
                (Callable::Free(slot), true)
            }
            Callable::Member(mut slot) => {
                let component = receiver
                    .and_then(|receiver| self.objects.get_mut(receiver))
                    .and_then(|data| data.component.as_deref_mut());
                let ok = match component {
                    Some(component) => slot(component, args),
                    None => false,
                };
                (Callable::Member(slot), ok)
            }
        };

        if ok {
            if let Some(table) = self.tables.get_mut(handle.table()) {
                table.checkin(handle.key(), callable);
            }
        } else {
            drop(callable);
            self.release(handle);
        }
        ok
    }
}
