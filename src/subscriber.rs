//! Per-activation guard handed to `create` emitter closures.

use crate::observer::Observer;

/// Wraps the downstream observer of one activation and polices the push
/// contract on its behalf: after a terminal event, or once downstream
/// reports itself closed, every further notification is swallowed.
pub struct Subscriber<O> {
  observer: Option<O>,
}

impl<O> Subscriber<O> {
  #[inline]
  pub fn new(observer: O) -> Self { Subscriber { observer: Some(observer) } }
}

impl<Item, Err, O> Observer<Item, Err> for Subscriber<O>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) {
    if let Some(observer) = &mut self.observer {
      if observer.is_closed() {
        self.observer = None;
      } else {
        observer.next(value);
      }
    }
  }

  fn error(mut self, err: Err) {
    if let Some(observer) = self.observer.take() {
      observer.error(err);
    }
  }

  fn complete(mut self) {
    if let Some(observer) = self.observer.take() {
      observer.complete();
    }
  }

  fn is_closed(&self) -> bool { self.observer.as_ref().map_or(true, Observer::is_closed) }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::observer::FnObserver;

  #[test]
  fn stops_forwarding_once_downstream_closes() {
    struct Closing {
      hits: std::rc::Rc<std::cell::Cell<usize>>,
    }

    impl Observer<i32, ()> for Closing {
      fn next(&mut self, _value: i32) { self.hits.set(self.hits.get() + 1) }

      fn error(self, _err: ()) {}

      fn complete(self) {}

      fn is_closed(&self) -> bool { self.hits.get() >= 1 }
    }

    let hits = std::rc::Rc::new(std::cell::Cell::new(0));
    let mut subscriber = Subscriber::new(Closing { hits: hits.clone() });
    subscriber.next(1);
    subscriber.next(2);
    subscriber.next(3);
    assert_eq!(hits.get(), 1);
    assert!(subscriber.is_closed());
  }

  #[test]
  fn open_until_terminal() {
    let mut seen = vec![];
    let subscriber = {
      let mut s = Subscriber::new(FnObserver::new(|v: i32| seen.push(v)));
      s.next(1);
      s
    };
    assert!(!subscriber.is_closed());
    subscriber.complete();
    assert_eq!(seen, vec![1]);
  }
}
