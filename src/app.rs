//! 批量处理入口
//!
//! 扫描题目目录，对每个下拉输入执行适配并输出渲染描述

use std::fs::OpenOptions;
use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::clients::MaximaClient;
use crate::config::Config;
use crate::models::{DropdownQuestion, InputState, Rendered, Warning};
use crate::services::{CasSession, DefaultStrings, Localizer, StringTable};
use crate::utils::logging::{
    init_log_file, log_questions_loaded, log_startup, print_final_stats, truncate_text,
};
use crate::workflow::DropdownInput;

/// 处理统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingStats {
    pub success: usize,
    pub failed: usize,
    pub total: usize,
}

/// 单个输入的处理报告
#[derive(Debug, Serialize)]
pub struct QuestionReport {
    pub name: String,
    pub rendered: Rendered,
    pub warnings: Vec<Warning>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// 应用主结构
pub struct App {
    config: Config,
    cas: Arc<dyn CasSession>,
    localizer: Arc<dyn Localizer>,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        init_log_file(&config.output_log_file)
            .with_context(|| format!("无法初始化日志文件: {}", config.output_log_file))?;

        log_startup(&config.cas_url, config.cas_timeout_secs);

        let localizer: Arc<dyn Localizer> = match &config.strings_file {
            Some(path) => Arc::new(StringTable::from_file(path)?),
            None => Arc::new(DefaultStrings),
        };
        let cas: Arc<dyn CasSession> = Arc::new(MaximaClient::new(&config));

        Ok(Self::with_collaborators(config, cas, localizer))
    }

    /// 使用自定义的 CAS 和本地化实现创建
    pub fn with_collaborators(
        config: Config,
        cas: Arc<dyn CasSession>,
        localizer: Arc<dyn Localizer>,
    ) -> Self {
        Self {
            config,
            cas,
            localizer,
        }
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<ProcessingStats> {
        info!("\n📁 正在扫描题目目录: {}", self.config.question_folder);
        let questions = crate::models::load_all_toml_files(&self.config.question_folder)
            .await
            .with_context(|| format!("无法加载题目目录: {}", self.config.question_folder))?;

        if questions.is_empty() {
            warn!("⚠️ 没有找到待处理的TOML文件，程序结束");
            return Ok(ProcessingStats::default());
        }

        log_questions_loaded(questions.len());

        let mut stats = ProcessingStats {
            total: questions.len(),
            ..Default::default()
        };

        for question in &questions {
            let report = self.process_question(question).await;
            if report.error.is_some() {
                stats.failed += 1;
            } else {
                stats.success += 1;
            }

            let json = serde_json::to_string_pretty(&report)?;
            println!("{}", json);
            self.append_log(&report)?;
        }

        print_final_stats(
            stats.success,
            stats.failed,
            stats.total,
            &self.config.output_log_file,
        );

        Ok(stats)
    }

    /// 处理单个输入
    pub async fn process_question(&self, question: &DropdownQuestion) -> QuestionReport {
        info!(
            "[输入 {}] 教师答案: {}",
            question.name,
            truncate_text(&question.teacher_answer, 80)
        );

        let mut input = DropdownInput::new(
            question.name.clone(),
            question.parameters.clone(),
            self.localizer.clone(),
        )
        .with_cas(self.cas.clone(), self.config.cas_timeout());
        if let Some(seed) = self.config.shuffle_seed {
            input = input.with_seed(seed);
        }

        let result = input.adapt_to_model_answer(&question.teacher_answer).await;
        let error = match result {
            Ok(adaptation) => {
                if self.config.verbose_logging {
                    for opt in &adaptation.options {
                        info!(
                            "[输入 {}]   {} → {} ({})",
                            question.name,
                            opt.value,
                            opt.display,
                            if opt.correct { "正确" } else { "干扰项" }
                        );
                    }
                }
                None
            }
            Err(e) => {
                error!("[输入 {}] ❌ 适配失败: {}", question.name, e);
                input.errors().map(str::to_string).or_else(|| Some(e.to_string()))
            }
        };

        QuestionReport {
            name: question.name.clone(),
            rendered: input.render(&InputState::default(), &question.name, false),
            warnings: input.warnings().to_vec(),
            error,
        }
    }

    fn append_log(&self, report: &QuestionReport) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.config.output_log_file)?;

        let status = match &report.error {
            Some(e) => format!("失败: {}", e),
            None => "成功".to_string(),
        };
        writeln!(
            file,
            "输入 {} | {} | 警告 {} 条",
            report.name,
            status,
            report.warnings.len()
        )?;
        Ok(())
    }
}
