//! 裁剪会话 - 流程层
//!
//! 核心职责：驱动一次次提交的生命周期
//!
//! 状态流转：
//! 1. Idle --submit(有效)--> Submitting
//! 2. Idle --submit(无文件)--> Settled(失败)，不发请求
//! 3. Submitting --成功/失败--> Settled
//! 4. Settled --submit--> Submitting（先撤销旧结果）
//!
//! 会话持有唯一的结果槽位。所有阶段切换都经过 `transition`，
//! 它在同一把锁内先撤销旧的本地句柄再写入新阶段。
//!
//! 调用方在响应返回前丢弃 `submit`（超时、取消任务）时，
//! `InFlight` 守卫把会话结算为传输失败，会话仍可重新提交。

use crate::clients::TrimClient;
use crate::error::{TransportFailure, TrimError};
use crate::infrastructure::BlobStore;
use crate::models::{
    FileSelection, FocusOption, ResultResource, SessionPhase, SessionState, Settlement,
    SubmissionMode, UserFacingError,
};
use crate::services::{DownloadWriter, ErrorClassifier, PayloadBuilder, ResultManager};
use crate::workflow::submit_ctx::SubmitCtx;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tracing::{error, info, warn};

/// 一次提交的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 成功，结果已安装到会话
    Succeeded(ResultResource),
    /// 失败，错误已写入会话状态
    Failed(UserFacingError),
    /// 上一次提交仍在进行，本次被拒绝，状态不变
    Rejected,
    /// 会话已关闭，结果被丢弃
    Abandoned,
}

struct SessionInner {
    phase: SessionPhase,
    client: Arc<TrimClient>,
}

/// 裁剪会话
///
/// - 同一时刻只允许一个进行中的提交
/// - 不自动重试，也不排队
/// - `shutdown` 或 drop 时撤销仍然存活的本地句柄
pub struct TrimSession {
    inner: Mutex<SessionInner>,
    manager: ResultManager,
    builder: PayloadBuilder,
    classifier: ErrorClassifier,
    teardown: watch::Sender<bool>,
    next_seq: AtomicUsize,
}

impl TrimSession {
    pub fn new(client: TrimClient, store: BlobStore) -> Self {
        let (teardown, _) = watch::channel(false);
        Self {
            inner: Mutex::new(SessionInner {
                phase: SessionPhase::Idle,
                client: Arc::new(client),
            }),
            manager: ResultManager::new(store),
            builder: PayloadBuilder::new(),
            classifier: ErrorClassifier::new(),
            teardown,
            next_seq: AtomicUsize::new(0),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_torn_down(&self) -> bool {
        *self.teardown.borrow()
    }

    /// 当前状态快照
    pub fn state(&self) -> SessionState {
        SessionState::from(&self.lock().phase)
    }

    pub fn phase(&self) -> SessionPhase {
        self.lock().phase.clone()
    }

    /// 当前使用的服务客户端
    pub fn client(&self) -> Arc<TrimClient> {
        self.lock().client.clone()
    }

    /// 提交一次裁剪
    ///
    /// # 参数
    /// - `selection`: 用户选择的文件
    /// - `mode`: 单张 / 批量
    /// - `focus`: 裁剪重点，请求发出后不再改变
    pub async fn submit(
        &self,
        selection: &FileSelection,
        mode: SubmissionMode,
        focus: FocusOption,
    ) -> SubmitOutcome {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed) + 1;
        let ctx = SubmitCtx::new(seq, mode, focus, selection.len());

        let (payload, client) = {
            let mut inner = self.lock();

            if self.is_torn_down() {
                warn!("{} 会话已关闭，忽略提交", ctx);
                return SubmitOutcome::Abandoned;
            }
            if inner.phase.loading() {
                warn!("{} ⚠️ 上一次提交仍在进行，拒绝本次提交", ctx);
                return SubmitOutcome::Rejected;
            }

            match self.builder.build(selection, mode) {
                Ok(payload) => {
                    self.transition(&mut inner, SessionPhase::Submitting);
                    (payload, inner.client.clone())
                }
                Err(err) => return SubmitOutcome::Failed(self.fail(&mut inner, &ctx, err)),
            }
        };

        let in_flight = InFlight {
            session: self,
            ctx: &ctx,
            armed: true,
        };

        info!("{} 📤 正在上传 {} 个文件...", ctx, payload.parts.len());

        let mut teardown = self.teardown.subscribe();
        let dispatched = tokio::select! {
            // 已返回的响应交给下方的关闭检查丢弃
            biased;
            result = client.dispatch(payload, focus) => Some(result),
            _ = teardown.wait_for(|torn_down| *torn_down) => None,
        };
        in_flight.disarm();

        let Some(result) = dispatched else {
            info!("{} 会话已关闭，已取消进行中的请求", ctx);
            return SubmitOutcome::Abandoned;
        };

        let mut inner = self.lock();
        if self.is_torn_down() {
            info!("{} 会话已关闭，丢弃返回的结果", ctx);
            return SubmitOutcome::Abandoned;
        }

        match result.and_then(|r| self.manager.materialize(r, &client)) {
            Ok(resource) => {
                info!("{} ✅ 裁剪完成: {}", ctx, resource.href());
                self.transition(
                    &mut inner,
                    SessionPhase::Settled(Settlement::Success(resource.clone())),
                );
                SubmitOutcome::Succeeded(resource)
            }
            Err(err) => SubmitOutcome::Failed(self.fail(&mut inner, &ctx, err)),
        }
    }

    /// 把当前结果写入输出目录
    pub async fn download(&self, writer: &DownloadWriter) -> Result<PathBuf> {
        let (resource, blob, client) = {
            let inner = self.lock();
            let resource = inner
                .phase
                .result()
                .cloned()
                .context("当前没有可下载的结果")?;
            let blob = self.manager.read_blob(&resource)?;
            (resource, blob, inner.client.clone())
        };

        let path = match blob {
            Some(data) => writer.write(resource.download_name(), &data).await?,
            None => {
                let bytes = client.fetch(resource.href()).await?;
                writer.write(resource.download_name(), &bytes).await?
            }
        };

        info!("💾 已保存: {}", path.display());
        Ok(path)
    }

    /// 切换服务地址
    ///
    /// 提交进行中时拒绝切换并返回 false。旧 origin 拼接的结果会被清除。
    pub fn change_origin(&self, client: TrimClient) -> bool {
        let mut inner = self.lock();
        if inner.phase.loading() {
            warn!("提交进行中，无法切换服务地址");
            return false;
        }

        let stale = matches!(
            inner.phase.result(),
            Some(ResultResource::Remote { origin, .. }) if origin != client.origin()
        );
        if stale {
            self.transition(&mut inner, SessionPhase::Idle);
        }

        info!("🌐 服务地址切换为: {}", client.origin());
        inner.client = Arc::new(client);
        true
    }

    /// 关闭会话：取消进行中的请求并撤销当前结果
    pub fn shutdown(&self) {
        self.teardown.send_replace(true);
        let mut inner = self.lock();
        self.transition(&mut inner, SessionPhase::Idle);
        info!("会话已关闭");
    }

    /// 唯一修改阶段的入口：先撤销旧结果，再写入新阶段
    fn transition(&self, inner: &mut SessionInner, next: SessionPhase) {
        self.manager.install(&mut inner.phase, next);
    }

    fn fail(&self, inner: &mut SessionInner, ctx: &SubmitCtx, err: TrimError) -> UserFacingError {
        let user = self.classifier.classify(&err);
        match err {
            TrimError::Validation(_) => warn!("{} ⚠️ {}", ctx, user.detail),
            _ => error!("{} ❌ {}", ctx, user.detail),
        }
        self.transition(inner, SessionPhase::Settled(Settlement::Failure(user.clone())));
        user
    }
}

/// 提交进行中的守卫
///
/// 在 `submit` 进入 Submitting 后创建；未被 `disarm` 就被丢弃时，
/// 说明调用方放弃了等待，此时把仍处于 Submitting 的会话结算为失败。
struct InFlight<'a> {
    session: &'a TrimSession,
    ctx: &'a SubmitCtx,
    armed: bool,
}

impl InFlight<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut inner = self.session.lock();
        if inner.phase.loading() {
            let err = TrimError::transport(self.ctx.mode.endpoint(), TransportFailure::Cancelled);
            self.session.fail(&mut inner, self.ctx, err);
        }
    }
}

impl Drop for TrimSession {
    fn drop(&mut self) {
        let inner = self.inner.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(resource) = inner.phase.result() {
            self.manager.retire(resource);
        }
    }
}
