//! One-stop import for the crate's everyday surface.

pub use crate::observable;
pub use crate::observable::{Observable, ObservableExt};
pub use crate::observer::{BoxObserver, BoxObserverThreads, FnObserver, Observer};
pub use crate::rc::{InnerDeref, InnerDerefMut, MutArc, MutRc};
#[cfg(all(feature = "timer", feature = "futures-scheduler"))]
pub use crate::scheduler::shared_pool;
#[cfg(feature = "timer")]
pub use crate::scheduler::{Duration, OnceTask, Scheduler, TaskHandle};
pub use crate::subject::{
  Subject, SubjectSubscription, SubjectSubscriptionThreads, SubjectThreads,
};
pub use crate::subscriber::Subscriber;
pub use crate::subscription::{
  BoxSubscription, BoxSubscriptionThreads, ClosureSubscription, MultiSubscription,
  MultiSubscriptionThreads, Subscription, TupleSubscription,
};
