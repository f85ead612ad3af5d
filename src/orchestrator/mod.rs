//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `exam_orchestrator` - 整卷生成编排器
//! - 按题型拆分矩阵
//! - 三个分区并发生成，等待全部结束
//! - 按固定顺序拼接卷头与各分区
//!
//! ### `app` - 会话驱动
//! - 持有矩阵存储（唯一写入者）
//! - 加载 / 推荐矩阵、输出配额提示
//! - 调用编排器生成并写出文件
//!
//! ## 层次关系
//!
//! ```text
//! app (持有 PlanStore)
//!     ↓
//! exam_orchestrator (处理整张矩阵)
//!     ↓
//! workflow::part_flow (处理单个分区)
//!     ↓
//! services (能力层：prompt / suggestion / writer)
//!     ↓
//! infrastructure (基础设施：TextGenerator)
//! ```

pub mod app;
pub mod exam_orchestrator;

pub use app::App;
pub use exam_orchestrator::ExamOrchestrator;
