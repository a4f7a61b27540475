//! Keyed demultiplexing.
//!
//! Every first-seen key emits one [`KeyObservable`] downstream; later values
//! with the same key flow into that group's backing subject. Terminal events
//! are fanned out to every open group before reaching the downstream
//! observer. The subject flavour is chosen at the call site
//! (`group_by::<_, _, Subject<_, _>>(..)` single-threaded,
//! `SubjectThreads<_, _>` for Send pipelines).

use std::collections::HashMap;
use std::hash::Hash;

use crate::observable::{Observable, ObservableExt};
use crate::observer::Observer;
use crate::subject::{Subject, SubjectThreads};
use crate::type_hint::TypeHint;

pub struct GroupByOp<S, KeySelector, Subject> {
  pub(crate) source: S,
  pub(crate) key_selector: KeySelector,
  pub(crate) _marker: TypeHint<Subject>,
}

impl<S: Clone, KeySelector: Clone, Subject> Clone for GroupByOp<S, KeySelector, Subject> {
  fn clone(&self) -> Self {
    GroupByOp { source: self.source.clone(), key_selector: self.key_selector.clone(), _marker: TypeHint::new() }
  }
}

/// One group of a `group_by`: the observable of every value whose key
/// matched `key`, tagged with that key.
#[derive(Clone)]
pub struct KeyObservable<Key, Subject> {
  pub key: Key,
  subject: Subject,
}

impl<Key, Item, Err, O, Subject> Observable<Item, Err, O> for KeyObservable<Key, Subject>
where
  O: Observer<Item, Err>,
  Subject: Observable<Item, Err, O>,
{
  type Unsub = Subject::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub { self.subject.actual_subscribe(observer) }
}

impl<Key, Item, Err, Subject> ObservableExt<Item, Err> for KeyObservable<Key, Subject> where
  Subject: ObservableExt<Item, Err>
{
}

pub struct GroupByObserver<O, KeySelector, Key, Subject> {
  observer: O,
  key_selector: KeySelector,
  groups: HashMap<Key, Subject>,
}

macro_rules! group_by_observable_impl {
  ($subject: ty $(,$lf: lifetime)?) => {
    impl<$($lf,)? S, KeySelector, Key, Item, Err, O> Observable<KeyObservable<Key, $subject>, Err, O>
      for GroupByOp<S, KeySelector, $subject>
    where
      O: Observer<KeyObservable<Key, $subject>, Err>,
      S: Observable<Item, Err, GroupByObserver<O, KeySelector, Key, $subject>>,
      KeySelector: FnMut(&Item) -> Key,
      Key: Hash + Eq + Clone,
      Item: Clone,
      Err: Clone,
    {
      type Unsub = S::Unsub;

      fn actual_subscribe(self, observer: O) -> Self::Unsub {
        self.source.actual_subscribe(GroupByObserver {
          observer,
          key_selector: self.key_selector,
          groups: HashMap::new(),
        })
      }
    }

    impl<$($lf,)? S, KeySelector, Key, Item, Err> ObservableExt<KeyObservable<Key, $subject>, Err>
      for GroupByOp<S, KeySelector, $subject>
    where
      S: ObservableExt<Item, Err>,
      KeySelector: FnMut(&Item) -> Key,
    {
    }
  };
}

group_by_observable_impl!(Subject<'a, Item, Err>, 'a);
group_by_observable_impl!(SubjectThreads<Item, Err>);

impl<Item, Err, O, KeySelector, Key, Subject> Observer<Item, Err>
  for GroupByObserver<O, KeySelector, Key, Subject>
where
  O: Observer<KeyObservable<Key, Subject>, Err>,
  KeySelector: FnMut(&Item) -> Key,
  Key: Hash + Eq + Clone,
  Subject: Clone + Default + Observer<Item, Err>,
  Err: Clone,
{
  fn next(&mut self, value: Item) {
    let key = (self.key_selector)(&value);
    let subject = self.groups.entry(key.clone()).or_insert_with(|| {
      let subject = Subject::default();
      let group = KeyObservable { key, subject: subject.clone() };
      self.observer.next(group);
      subject
    });
    subject.next(value);
  }

  fn error(mut self, err: Err) {
    for (_, subject) in self.groups.drain() {
      subject.error(err.clone());
    }
    self.observer.error(err);
  }

  fn complete(mut self) {
    for (_, subject) in self.groups.drain() {
      subject.complete();
    }
    self.observer.complete();
  }

  #[inline]
  fn is_closed(&self) -> bool { self.observer.is_closed() }
}

#[cfg(test)]
mod tests {
  use std::{cell::Cell, rc::Rc};

  use crate::prelude::*;

  #[test]
  fn splits_by_parity() {
    let mut groups = 0;
    observable::from_iter(0..100)
      .group_by::<_, _, Subject<_, _>>(|v| v % 2 == 0)
      .subscribe(|group| {
        groups += 1;
        if group.key {
          group.subscribe(|v| assert_eq!(v % 2, 0));
        } else {
          group.subscribe(|v| assert_ne!(v % 2, 0));
        }
      });
    assert_eq!(groups, 2);
  }

  #[test]
  fn one_group_per_key() {
    let groups = Rc::new(Cell::new(0));
    let g = groups.clone();
    observable::from_iter(vec![1i64, 2, 2, 1, 3])
      .group_by::<_, _, Subject<_, _>>(|v| *v)
      .subscribe(move |_| g.set(g.get() + 1));
    assert_eq!(groups.get(), 3);
  }

  #[test]
  fn groups_observe_completion() {
    let completions = Rc::new(Cell::new(0));
    observable::from_iter(vec![1, 2, 3])
      .group_by::<_, _, Subject<_, _>>(|v| *v)
      .subscribe(|group| {
        let c = completions.clone();
        group
          .on_complete(move || c.set(c.get() + 1))
          .subscribe(|_| {});
      });
    assert_eq!(completions.get(), 3);
  }

  #[test]
  fn values_reach_their_group() {
    let seen = Rc::new(Cell::new(0));
    observable::from_iter(vec![(1, 10), (2, 20), (1, 30)])
      .group_by::<_, _, Subject<_, _>>(|pair: &(i32, i32)| pair.0)
      .subscribe(|group| {
        if group.key == 1 {
          let seen = seen.clone();
          group.subscribe(move |pair: (i32, i32)| seen.set(seen.get() + pair.1));
        }
      });
    assert_eq!(seen.get(), 40);
  }
}
