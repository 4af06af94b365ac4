//! 浏览器任务派发
//!
//! 会话控制器通过 `futures::task::LocalSpawn` 派发异步任务，浏览器中直接交给
//! `wasm_bindgen_futures::spawn_local` 在微任务队列上执行。

use futures::task::{LocalFutureObj, LocalSpawn, SpawnError};

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSpawner;

impl LocalSpawn for BrowserSpawner {
    fn spawn_local_obj(&self, future: LocalFutureObj<'static, ()>) -> Result<(), SpawnError> {
        wasm_bindgen_futures::spawn_local(future);
        Ok(())
    }
}
