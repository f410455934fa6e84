use std::future::Future;
use std::sync::Arc;

use parking_lot::Mutex;

/// Handle to work running off the UI loop. The UI polls it once per frame.
/// Dropping the handle abandons the result; the work itself runs to completion.
pub struct PendingTask<T> {
    slot: Arc<Mutex<Option<T>>>,
}

impl<T: Send + 'static> PendingTask<T> {
    pub fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        let slot = Arc::new(Mutex::new(None));
        let writer = Arc::clone(&slot);
        let job = async move {
            let output = future.await;
            *writer.lock() = Some(output);
        };

        #[cfg(not(target_arch = "wasm32"))]
        std::thread::spawn(move || futures::executor::block_on(job));

        #[cfg(target_arch = "wasm32")]
        wasm_bindgen_futures::spawn_local(job);

        Self { slot }
    }

    /// Take the result if the work has finished
    pub fn poll(&self) -> Option<T> {
        self.slot.lock().take()
    }
}
