//! 下拉输入 - 流程层
//!
//! 核心职责：把教师答案变成可渲染、可校验的选项集合
//!
//! 流程顺序：
//! 1. 解析 options 字符串
//! 2. 解析教师答案（无正确答案时直接失败，不触碰 CAS）
//! 3. 解析显示形式（casstring 直接包裹，LaTeX 整批送 CAS）
//! 4. 构建并缓存洗牌后的选项集合，渲染与校验共用这一份

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info, warn};

use crate::error::{AppError, AppResult};
use crate::models::{
    ChoiceSet, DropdownConfig, DropdownOption, InputParameters, InputState, Rendered,
    TestInputField, Warning, WidgetDescription,
};
use crate::services::localization::{
    DDL_EMPTY, DDL_NO_CORRECT_ANSWER, DDL_UNRECOGNISED_VALUE, NOT_ANSWERED,
};
use crate::services::{
    build_choices, collect_options, ensure_correct, parse_options, resolve_displays, CasSession,
    Localizer,
};

/// 成功适配后的结果
#[derive(Debug, Clone)]
pub struct Adaptation {
    pub options: Vec<DropdownOption>,
    pub warnings: Vec<Warning>,
}

/// 下拉输入
///
/// 每个题目实例创建一个。适配完成后选项和洗牌顺序都不再变化。
pub struct DropdownInput {
    name: String,
    parameters: InputParameters,
    config: DropdownConfig,
    options: Vec<DropdownOption>,
    choices: ChoiceSet,
    warnings: Vec<Warning>,
    errors: Option<String>,
    localizer: Arc<dyn Localizer>,
    cas: Option<Arc<dyn CasSession>>,
    cas_timeout: Duration,
    rng: StdRng,
}

impl DropdownInput {
    /// 创建新的下拉输入
    pub fn new(
        name: impl Into<String>,
        parameters: InputParameters,
        localizer: Arc<dyn Localizer>,
    ) -> Self {
        Self {
            name: name.into(),
            parameters,
            config: DropdownConfig::default(),
            options: Vec::new(),
            choices: ChoiceSet::new(),
            warnings: Vec::new(),
            errors: None,
            localizer,
            cas: None,
            cas_timeout: Duration::from_secs(10),
            rng: StdRng::from_entropy(),
        }
    }

    /// 注入 CAS 会话和单次调用的超时
    pub fn with_cas(mut self, cas: Arc<dyn CasSession>, timeout: Duration) -> Self {
        self.cas = Some(cas);
        self.cas_timeout = timeout;
        self
    }

    /// 固定洗牌种子，使选项顺序可复现
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// 参数默认值
    pub fn parameters_defaults() -> InputParameters {
        InputParameters::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &InputParameters {
        &self.parameters
    }

    pub fn config(&self) -> &DropdownConfig {
        &self.config
    }

    pub fn options(&self) -> &[DropdownOption] {
        &self.options
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// 适配失败时的消息（本地化或 CAS 原文）
    pub fn errors(&self) -> Option<&str> {
        self.errors.as_deref()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_none()
    }

    /// 根据教师答案建立选项
    ///
    /// 失败时输入被标记为无效，不会产生任何可渲染的选项集合。
    pub async fn adapt_to_model_answer(&mut self, teacher_answer: &str) -> AppResult<Adaptation> {
        self.errors = None;
        self.options.clear();
        self.choices = ChoiceSet::new();

        // (1) 注册配置
        let parsed_config = parse_options(&self.parameters.options);
        self.config = parsed_config.value;
        let mut warnings = parsed_config.warnings;

        // (2) 解析教师答案，失败时也保留解析警告
        let parsed = collect_options(teacher_answer);
        warnings.extend(parsed.warnings);
        self.warnings = warnings;
        if let Err(e) = ensure_correct(&parsed.value) {
            warn!("[输入 {}] ⚠️ {}", self.name, e);
            self.errors = Some(self.localizer.get_string(DDL_NO_CORRECT_ANSWER));
            return Err(AppError::Input(e));
        }

        info!(
            "[输入 {}] 解析到 {} 个选项 (控件: {}, 显示: {}, 洗牌: {})",
            self.name,
            parsed.value.len(),
            self.config.widget_type,
            self.config.display_mode,
            self.config.shuffle
        );

        // (3) 解析显示形式
        let resolved = resolve_displays(
            &parsed.value,
            self.config.display_mode,
            self.cas.as_deref(),
            self.cas_timeout,
        )
        .await;

        let options = match resolved {
            Ok(options) => options,
            Err(e) => {
                error!("[输入 {}] ❌ 显示形式生成失败: {}", self.name, e);
                // 保留已解析的选项，但显示仍为原始文本
                self.options = parsed.value;
                self.errors = Some(e.to_string());
                return Err(AppError::Cas(e));
            }
        };

        // (4) 构建并缓存选项集合
        let label = self.localizer.get_string(NOT_ANSWERED);
        self.choices = build_choices(&options, self.config.shuffle, &label, &mut self.rng);
        self.options = options;

        info!("[输入 {}] ✓ 适配完成，共 {} 个可选项", self.name, self.choices.len());

        Ok(Adaptation {
            options: self.options.clone(),
            warnings: self.warnings.clone(),
        })
    }

    /// 当前实例缓存的选项集合
    pub fn choices(&self) -> &ChoiceSet {
        &self.choices
    }

    /// 校验学生提交的值
    ///
    /// 提交值不在选项集合中时返回本地化的错误消息
    pub fn validate(&self, state: &InputState) -> Result<(), String> {
        let submitted = state.contents_to_maxima();
        if self.choices.contains_key(submitted) {
            Ok(())
        } else {
            warn!("[输入 {}] 收到无法识别的值: {}", self.name, submitted);
            Err(self.localizer.get_string(DDL_UNRECOGNISED_VALUE))
        }
    }

    /// 生成选择控件描述
    pub fn render(&self, state: &InputState, field_name: &str, readonly: bool) -> Rendered {
        if self.choices.is_empty() {
            return Rendered::Empty(self.localizer.get_string(DDL_EMPTY));
        }

        Rendered::Widget(WidgetDescription {
            kind: self.config.widget_type,
            field_name: field_name.to_string(),
            options: self.choices.to_pairs(),
            selected: state.contents_to_maxima().to_string(),
            disabled: readonly,
        })
    }

    /// 教师测试表单中的字段
    pub fn test_input_field(&self) -> TestInputField {
        if self.choices.is_empty() {
            TestInputField::Static {
                name: self.name.clone(),
                message: self.localizer.get_string(DDL_EMPTY),
            }
        } else {
            TestInputField::Select {
                name: self.name.clone(),
                label: self.name.clone(),
                options: self.choices.to_pairs(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CasError, InputError};
    use crate::models::{DdlDisplay, DdlType, NamedExpression};
    use crate::services::DefaultStrings;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingCas {
        calls: AtomicUsize,
        fail_with: Option<String>,
    }

    impl CountingCas {
        fn ok() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail_with: None,
            })
        }

        fn failing(message: &str) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail_with: Some(message.to_string()),
            })
        }
    }

    #[async_trait]
    impl CasSession for CountingCas {
        async fn evaluate_batch(
            &self,
            batch: &[NamedExpression],
        ) -> Result<HashMap<String, String>, CasError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.fail_with {
                Some(message) => Err(CasError::Engine(message.clone())),
                None => Ok(batch
                    .iter()
                    .map(|e| (e.name.clone(), e.expr.clone()))
                    .collect()),
            }
        }
    }

    fn input(options: &str) -> DropdownInput {
        DropdownInput::new(
            "ans1",
            InputParameters::with_options(options),
            Arc::new(DefaultStrings),
        )
        .with_seed(3)
    }

    #[tokio::test]
    async fn test_casstring_adaptation() {
        let mut ddl = input("radio");
        let adaptation = ddl
            .adapt_to_model_answer("[[x^2,true,x^{2}],[x^3,false]]")
            .await
            .unwrap();

        assert_eq!(adaptation.options.len(), 2);
        assert_eq!(adaptation.options[0].display, "<code>x^{2}</code>");
        assert_eq!(ddl.config().widget_type, DdlType::Radio);
        assert!(ddl.is_valid());
        assert_eq!(ddl.choices().len(), 3);
        assert_eq!(ddl.choices().get(""), Some("(Clear my choice)"));
    }

    #[tokio::test]
    async fn test_no_correct_answer_never_calls_cas() {
        let cas = CountingCas::ok();
        let mut ddl = input("latex").with_cas(cas.clone(), Duration::from_secs(1));
        let err = ddl
            .adapt_to_model_answer("[[a,false],[b,false]]")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Input(InputError::NoCorrectAnswer)));
        assert_eq!(cas.calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            ddl.errors(),
            Some("The teacher did not indicate at least one correct answer.")
        );
        assert!(ddl.choices().is_empty());
        assert_eq!(
            ddl.render(&InputState::default(), "ans1", false),
            Rendered::Empty("No choices were provided for this drop-down.".to_string())
        );
    }

    #[tokio::test]
    async fn test_latex_scenario() {
        let cas = CountingCas::ok();
        let mut ddl = input("latex").with_cas(cas.clone(), Duration::from_secs(1));
        let adaptation = ddl
            .adapt_to_model_answer("[[a,true,a],[b,false,b]]")
            .await
            .unwrap();

        assert_eq!(ddl.config().display_mode, DdlDisplay::Latex);
        assert_eq!(adaptation.options[0].display, "\\[a\\]");
        assert_eq!(adaptation.options[1].display, "\\[b\\]");
        assert_eq!(cas.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cas_failure_marks_input_invalid() {
        let cas = CountingCas::failing("Undefined variable q");
        let mut ddl = input("latexinline").with_cas(cas, Duration::from_secs(1));
        let err = ddl
            .adapt_to_model_answer("[[a,true,a],[b,false,b]]")
            .await
            .unwrap_err();

        assert!(err.is_cas());
        assert_eq!(ddl.errors(), Some("Undefined variable q"));
        assert!(!ddl.is_valid());
        // 已解析的选项保留，显示未被改动
        assert_eq!(ddl.options().len(), 2);
        assert_eq!(ddl.options()[0].display, "a");
        assert!(ddl.choices().is_empty());
    }

    #[tokio::test]
    async fn test_choices_are_cached_between_render_and_validate() {
        let mut ddl = input("shuffle");
        ddl.adapt_to_model_answer("[[a,true],[b,false],[c,false],[d,false],[e,false]]")
            .await
            .unwrap();

        let first = ddl.choices().clone();
        let state = InputState::default();
        for _ in 0..5 {
            assert_eq!(ddl.choices(), &first);
            match ddl.render(&state, "ans1", false) {
                Rendered::Widget(w) => assert_eq!(w.options, first.to_pairs()),
                Rendered::Empty(_) => panic!("应当有选项"),
            }
        }
    }

    #[tokio::test]
    async fn test_validate() {
        let mut ddl = input("");
        ddl.adapt_to_model_answer("[[a,true],[b,false]]").await.unwrap();

        assert!(ddl.validate(&InputState::single("a")).is_ok());
        assert!(ddl.validate(&InputState::single("")).is_ok());
        assert!(ddl.validate(&InputState::default()).is_ok());
        assert_eq!(
            ddl.validate(&InputState::single("z")).unwrap_err(),
            "Invalid choice for this input."
        );
    }

    #[tokio::test]
    async fn test_render_widget() {
        let mut ddl = input("checkbox");
        ddl.adapt_to_model_answer("[[a,true]]").await.unwrap();

        let rendered = ddl.render(&InputState::single("a"), "q1:ans1", true);
        let Rendered::Widget(widget) = rendered else {
            panic!("应当渲染控件");
        };
        assert_eq!(widget.kind, DdlType::Checkbox);
        assert_eq!(widget.field_name, "q1:ans1");
        assert_eq!(widget.selected, "a");
        assert!(widget.disabled);
        assert_eq!(
            widget.options,
            vec![
                ("".to_string(), "(Clear my choice)".to_string()),
                ("a".to_string(), "<code>a</code>".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_test_input_field() {
        let mut ddl = input("");
        assert!(matches!(ddl.test_input_field(), TestInputField::Static { .. }));

        ddl.adapt_to_model_answer("[[a,true]]").await.unwrap();
        match ddl.test_input_field() {
            TestInputField::Select { name, options, .. } => {
                assert_eq!(name, "ans1");
                assert_eq!(options.len(), 2);
            }
            other => panic!("意外的字段: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_warnings_are_collected() {
        let mut ddl = input("radio,sorted");
        let adaptation = ddl
            .adapt_to_model_answer("[[a,true],[b],[a,false]]")
            .await
            .unwrap();
        assert_eq!(adaptation.warnings.len(), 3);
        assert_eq!(ddl.warnings(), adaptation.warnings.as_slice());
    }

    #[tokio::test]
    async fn test_empty_value_is_not_a_correct_answer() {
        let mut ddl = input("radio");
        let err = ddl
            .adapt_to_model_answer("[[,true],[b,false]]")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Input(InputError::NoCorrectAnswer)));
        assert_eq!(ddl.warnings(), &[Warning::EmptyValue { index: 0 }]);
        assert!(ddl.choices().is_empty());
    }

    #[tokio::test]
    async fn test_non_list_answer_keeps_warning() {
        let mut ddl = input("radio");
        assert!(ddl.adapt_to_model_answer("x^2").await.is_err());
        assert_eq!(
            ddl.warnings(),
            &[Warning::NotAList {
                raw: "x^2".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_same_seed_same_order() {
        let answer = "[[a,true],[b,false],[c,false],[d,false],[e,false],[f,false]]";
        let mut first = input("");
        let mut second = input("");
        first.adapt_to_model_answer(answer).await.unwrap();
        second.adapt_to_model_answer(answer).await.unwrap();
        assert_eq!(first.choices(), second.choices());
    }

    #[test]
    fn test_parameters_defaults() {
        let defaults = DropdownInput::parameters_defaults();
        assert_eq!(defaults, InputParameters::default());
    }
}
