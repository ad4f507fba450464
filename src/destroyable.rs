/// Implemented by anything holding a live subscription on a channel. The
/// subscription closure keeps an `Rc` to its owner, so the cycle has to be
/// broken by hand before the owner is dropped.
pub trait Destroyable {
    fn destroy(&mut self);
}
