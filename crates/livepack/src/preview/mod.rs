mod preview_options;
mod preview_state;

use std::{sync::Arc, time::Duration};

use livepack_fs::VirtualFileSet;
use tokio::{
  sync::{mpsc, watch},
  task::{JoinHandle, JoinSet},
};

pub use self::{preview_options::PreviewOptions, preview_state::PreviewState};
use crate::{fetch_externals, Bundler, ExternalResolver, PreparedBundle};

/// Keeps a preview in step with a file set that keeps changing.
///
/// Edits are debounced: a run starts once no new edit arrived for [`PreviewOptions::debounce`].
/// Runs are never cancelled. Each one is tagged with the generation of its input and may only
/// publish over states of older generations, so observers end up on the latest input even when
/// an older run finishes last.
pub struct PreviewSession {
  edits: mpsc::UnboundedSender<VirtualFileSet>,
  state: watch::Receiver<PreviewState>,
  task: JoinHandle<()>,
}

impl PreviewSession {
  /// Starts the session on the current tokio runtime.
  pub fn spawn(
    bundler: Arc<Bundler>,
    resolver: Arc<dyn ExternalResolver>,
    options: PreviewOptions,
  ) -> Self {
    let (edits, edits_rx) = mpsc::unbounded_channel();
    let (state_tx, state) = watch::channel(PreviewState::Idle);
    let runner = Arc::new(Runner { bundler, resolver, state: state_tx });
    let task = tokio::spawn(run_session(edits_rx, runner, options.debounce));
    Self { edits, state, task }
  }

  pub fn update(&self, files: VirtualFileSet) -> anyhow::Result<()> {
    self.edits.send(files).map_err(|_| anyhow::anyhow!("The preview session has shut down"))
  }

  pub fn subscribe(&self) -> watch::Receiver<PreviewState> {
    self.state.clone()
  }

  pub fn state(&self) -> PreviewState {
    self.state.borrow().clone()
  }

  /// Stops taking edits and waits for pending and in-flight runs.
  pub async fn shutdown(self) -> anyhow::Result<PreviewState> {
    drop(self.edits);
    self.task.await?;
    Ok(self.state.borrow().clone())
  }
}

async fn run_session(
  mut edits: mpsc::UnboundedReceiver<VirtualFileSet>,
  runner: Arc<Runner>,
  debounce: Duration,
) {
  let mut generation = 0;
  let mut in_flight = JoinSet::new();

  while let Some(mut files) = edits.recv().await {
    while in_flight.try_join_next().is_some() {}
    while let Ok(Some(newer)) = tokio::time::timeout(debounce, edits.recv()).await {
      files = newer;
    }

    generation += 1;
    tracing::debug!(generation, files = files.len(), "input settled, starting a run");
    let runner = Arc::clone(&runner);
    in_flight.spawn(async move { runner.run(generation, files).await });
  }

  while in_flight.join_next().await.is_some() {}
}

struct Runner {
  bundler: Arc<Bundler>,
  resolver: Arc<dyn ExternalResolver>,
  state: watch::Sender<PreviewState>,
}

impl Runner {
  async fn run(&self, generation: u64, files: VirtualFileSet) {
    let output = match self.bundler.bundle(&files) {
      Ok(output) => output,
      Err(err) => {
        self.publish(PreviewState::Failed { generation, message: err.to_string() });
        return;
      }
    };

    let dependencies = output.payload.dependencies.clone();
    self.publish(PreviewState::Bundling { generation, dependencies });

    let state = match fetch_externals(&output.payload.dependencies, self.resolver.as_ref()).await {
      Ok(externals) => PreviewState::Ready {
        generation,
        bundle: Arc::new(PreparedBundle { output, externals }),
      },
      Err(err) => PreviewState::Failed { generation, message: err.to_string() },
    };
    self.publish(state);
  }

  fn publish(&self, next: PreviewState) {
    self.state.send_if_modified(|current| {
      if next.supersedes(current) {
        tracing::debug!(generation = next.generation(), status = %next, "preview state changed");
        *current = next;
        true
      } else {
        tracing::debug!(
          generation = next.generation(),
          current = current.generation(),
          "dropping stale preview state"
        );
        false
      }
    });
  }
}

#[cfg(test)]
mod tests {
  use std::sync::atomic::{AtomicUsize, Ordering};

  use futures::{future::BoxFuture, FutureExt};
  use livepack_common::{BundlerOptions, ExternalModule};

  use super::*;

  fn files(label: &str) -> VirtualFileSet {
    VirtualFileSet::from_iter([(
      "src/App.jsx",
      format!("import pad from 'left-pad';\nexport const label = {label:?};\n"),
    )])
  }

  /// Answers after a delay that depends on how many calls came before, so earlier runs can be
  /// made to finish after later ones.
  struct SlowResolver {
    calls: AtomicUsize,
    delays: Vec<Duration>,
  }

  impl ExternalResolver for SlowResolver {
    fn resolve<'a>(&'a self, package: &'a str) -> BoxFuture<'a, anyhow::Result<ExternalModule>> {
      let call = self.calls.fetch_add(1, Ordering::SeqCst);
      let delay = self.delays.get(call).copied().unwrap_or_default();
      async move {
        tokio::time::sleep(delay).await;
        Ok(ExternalModule::new(package, format!("module.exports = {call};")))
      }
      .boxed()
    }
  }

  fn session(delays: Vec<Duration>) -> (PreviewSession, Arc<SlowResolver>) {
    let resolver = Arc::new(SlowResolver { calls: AtomicUsize::new(0), delays });
    let session = PreviewSession::spawn(
      Arc::new(Bundler::new(BundlerOptions::default())),
      Arc::clone(&resolver) as Arc<dyn ExternalResolver>,
      PreviewOptions::default(),
    );
    (session, resolver)
  }

  fn ready_label(state: &PreviewState) -> Option<String> {
    match state {
      PreviewState::Ready { bundle, .. } => {
        Some(bundle.output.module_table.get("src/App.jsx")?.body.clone())
      }
      _ => None,
    }
  }

  #[tokio::test(start_paused = true)]
  async fn coalesces_rapid_edits() {
    let (session, resolver) = session(vec![]);
    for label in ["a", "ab", "abc"] {
      session.update(files(label)).unwrap();
      tokio::time::sleep(Duration::from_millis(100)).await;
    }

    let state = session.shutdown().await.unwrap();
    assert_eq!(state.generation(), 1);
    assert!(ready_label(&state).unwrap().contains("\"abc\""));
    assert_eq!(resolver.calls.load(Ordering::SeqCst), 1);
  }

  #[tokio::test(start_paused = true)]
  async fn latest_input_wins_over_late_finisher() {
    // The first run waits far longer for its dependency than the second one.
    let (session, resolver) =
      session(vec![Duration::from_secs(10), Duration::from_millis(10)]);

    session.update(files("first")).unwrap();
    tokio::time::sleep(Duration::from_millis(600)).await;
    session.update(files("second")).unwrap();

    let state = session.shutdown().await.unwrap();
    assert_eq!(resolver.calls.load(Ordering::SeqCst), 2);
    assert_eq!(state.generation(), 2);
    assert!(ready_label(&state).unwrap().contains("\"second\""));
  }

  #[tokio::test(start_paused = true)]
  async fn settled_edits_each_publish() {
    let (session, resolver) = session(vec![]);
    let states = session.subscribe();
    for (generation, label) in (1..).zip(["one", "two", "three"]) {
      session.update(files(label)).unwrap();
      tokio::time::sleep(Duration::from_secs(1)).await;
      assert_eq!(states.borrow().generation(), generation);
    }

    let state = session.shutdown().await.unwrap();
    assert_eq!(resolver.calls.load(Ordering::SeqCst), 3);
    assert!(ready_label(&state).unwrap().contains("\"three\""));
  }

  #[tokio::test(start_paused = true)]
  async fn reports_progress_then_result() {
    let (session, _) = session(vec![Duration::from_secs(1)]);
    let mut states = session.subscribe();

    session.update(files("x")).unwrap();
    states.changed().await.unwrap();
    assert_eq!(states.borrow_and_update().to_string(), "Loading dependencies: left-pad...");
    states.changed().await.unwrap();
    assert_eq!(states.borrow_and_update().to_string(), "Bundled successfully.");

    session.shutdown().await.unwrap();
  }

  #[tokio::test(start_paused = true)]
  async fn surfaces_bundle_errors() {
    let (session, _) = session(vec![]);
    session.update(VirtualFileSet::from_iter([("notes.md", "nothing to bundle")])).unwrap();
    let state = session.shutdown().await.unwrap();
    assert!(matches!(state, PreviewState::Failed { generation: 1, .. }));
    assert_eq!(state.to_string(), "Bundle Error: The file set contains no compilable files");
  }
}
