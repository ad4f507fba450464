/// A read model fed from a channel, e.g. the UI's view of the session.
pub trait EventHandler<T> {
    fn handle_event(&mut self, event: &T);
}
