//! The scheduling capability consumed by the timing operators.
//!
//! The operators do not mandate an executor; anything that can run a unit
//! of work now or after a delay qualifies. Implementations are provided for
//! the `futures` executors (`LocalSpawner`, `ThreadPool`) and, behind the
//! `tokio-scheduler` feature, for a `tokio` runtime handle.
//!
//! Tasks are [`OnceTask`] values (a plain `fn` pointer plus its argument
//! tuple) rather than closures, so operator bounds can name the scheduled
//! task type. Every scheduled task is guarded by the [`TaskHandle`] the
//! scheduler returns: disposing the handle before the task has started
//! prevents it from ever running.

use std::{
  future::Future,
  pin::Pin,
  sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
  },
  task::{Context, Poll},
};

use futures::ready;
use futures::task::LocalSpawnExt;
use pin_project_lite::pin_project;

pub use std::time::Duration;

use crate::subscription::Subscription;

/// A unit of work scheduled exactly once: a function pointer applied to a
/// moved argument tuple.
pub struct OnceTask<Args> {
  func: fn(Args),
  args: Args,
}

impl<Args> OnceTask<Args> {
  #[inline]
  pub fn new(func: fn(Args), args: Args) -> Self { OnceTask { func, args } }

  #[inline]
  pub fn run(self) { (self.func)(self.args) }
}

/// Cancellation handle for one scheduled task. Disposing it prevents a task
/// that has not started from running; a task already executing is not
/// interrupted.
#[derive(Clone, Default)]
pub struct TaskHandle(Arc<AtomicBool>);

impl Subscription for TaskHandle {
  #[inline]
  fn unsubscribe(self) { self.0.store(true, Ordering::Relaxed) }

  #[inline]
  fn is_closed(&self) -> bool { self.0.load(Ordering::Relaxed) }
}

/// Something that can run a [`OnceTask`] at a future time, possibly on
/// another thread.
pub trait Scheduler<T> {
  fn schedule(&self, task: T, delay: Option<Duration>) -> TaskHandle;
}

pin_project! {
  /// The future an executor drives for one scheduled task: an optional
  /// sleep, then the task, unless the handle was disposed in the
  /// meantime.
  pub struct TaskFuture<Args> {
    #[pin]
    sleep: Option<futures_time::task::Sleep>,
    task: Option<OnceTask<Args>>,
    handle: TaskHandle,
  }
}

impl<Args> TaskFuture<Args> {
  fn new(task: OnceTask<Args>, delay: Option<Duration>, handle: TaskHandle) -> Self {
    TaskFuture {
      sleep: delay.map(|d| futures_time::task::sleep(d.into())),
      task: Some(task),
      handle,
    }
  }
}

impl<Args> Future for TaskFuture<Args> {
  type Output = ();

  fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
    let mut this = self.project();
    if this.handle.is_closed() {
      return Poll::Ready(());
    }
    if let Some(sleep) = this.sleep.as_mut().as_pin_mut() {
      ready!(sleep.poll(cx));
      this.sleep.set(None);
    }
    if !this.handle.is_closed() {
      if let Some(task) = this.task.take() {
        task.run();
      }
    }
    Poll::Ready(())
  }
}

impl<Args: 'static> Scheduler<OnceTask<Args>> for futures::executor::LocalSpawner {
  fn schedule(&self, task: OnceTask<Args>, delay: Option<Duration>) -> TaskHandle {
    let handle = TaskHandle::default();
    self
      .spawn_local(TaskFuture::new(task, delay, handle.clone()))
      .expect("scheduler: spawn on a shut down executor");
    handle
  }
}

#[cfg(feature = "futures-scheduler")]
impl<Args: Send + 'static> Scheduler<OnceTask<Args>> for futures::executor::ThreadPool {
  fn schedule(&self, task: OnceTask<Args>, delay: Option<Duration>) -> TaskHandle {
    let handle = TaskHandle::default();
    self.spawn_ok(TaskFuture::new(task, delay, handle.clone()));
    handle
  }
}

/// Process-wide worker pool for callers that do not manage an executor of
/// their own. Built lazily on first use.
#[cfg(feature = "futures-scheduler")]
pub fn shared_pool() -> &'static futures::executor::ThreadPool {
  use once_cell::sync::Lazy;
  static POOL: Lazy<futures::executor::ThreadPool> = Lazy::new(|| {
    futures::executor::ThreadPool::new().expect("scheduler: unable to start the worker pool")
  });
  &POOL
}

#[cfg(feature = "tokio-scheduler")]
impl<Args: Send + 'static> Scheduler<OnceTask<Args>> for tokio::runtime::Handle {
  fn schedule(&self, task: OnceTask<Args>, delay: Option<Duration>) -> TaskHandle {
    let handle = TaskHandle::default();
    let guard = handle.clone();
    self.spawn(async move {
      if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
      }
      if !guard.is_closed() {
        task.run();
      }
    });
    handle
  }
}
