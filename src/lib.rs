//! # Stack Dropdown
//!
//! 题目引擎中的"下拉"输入类型：把教师给出的候选答案列表变成学生可选的
//! 下拉 / 单选 / 多选控件，校验学生的提交，并可通过外部 CAS 生成 LaTeX 显示。
//!
//! ## 架构设计
//!
//! ### ① 数据层（Models）
//! - `models/` - 选项、配置参数、选项集合、诊断信息、渲染描述
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 每个模块只提供一种能力，不关心流程
//! - `parse_options` / `parse_teacher_answer` - 解析配置与教师答案
//! - `resolve_displays` - 显示形式解析（可能调用 CAS）
//! - `build_choices` - 构建带哨兵的选项集合
//! - `Localizer` - 本地化字符串
//!
//! ### ③ 客户端（Clients）
//! - `clients/` - `MaximaClient`，通过 HTTP 实现 `CasSession`
//!
//! ### ④ 流程层（Workflow）
//! - `workflow/` - `DropdownInput`：适配 → 缓存选项 → 渲染 / 校验
//!
//! ## 模块结构

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use clients::MaximaClient;
pub use config::Config;
pub use error::{AppError, AppResult, CasError, InputError};
pub use models::{DropdownOption, DropdownQuestion, InputParameters, InputState, Rendered};
pub use services::{CasSession, DefaultStrings, Localizer, StringTable};
pub use utils::logging;
pub use workflow::{Adaptation, DropdownInput};
