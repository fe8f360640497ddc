// HTML渲染工具
// 生成自动提交到绿界收银台的跳转页面

/// 跳转前的延迟 (毫秒)，仅为显示载入画面
pub const AUTO_SUBMIT_DELAY_MS: u64 = 1000;

/// HTML转义
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// 渲染自动提交的付款表单页面
///
/// # Arguments
/// * `action` - 表单提交地址 (绿界收银台)
/// * `fields` - 已签名的全部参数，逐一渲染为隐藏字段
///
/// # Returns
/// * 完整HTML文档
pub fn render_auto_submit_form(action: &str, fields: &[(&str, String)]) -> String {
    let inputs = fields
        .iter()
        .map(|(name, value)| {
            format!(
                r#"<input type="hidden" name="{}" value="{}">"#,
                escape_html(name),
                escape_html(value)
            )
        })
        .collect::<Vec<_>>()
        .join("\n      ");

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>正在導向付款頁面...</title>
  <style>
    body {{ font-family: Arial, sans-serif; text-align: center; padding: 50px; background-color: #f5f5f5; }}
    .loading {{ font-size: 18px; color: #333; }}
    .spinner {{
      border: 4px solid #f3f3f3;
      border-top: 4px solid #3498db;
      border-radius: 50%;
      width: 40px;
      height: 40px;
      animation: spin 2s linear infinite;
      margin: 20px auto;
    }}
    @keyframes spin {{ 0% {{ transform: rotate(0deg); }} 100% {{ transform: rotate(360deg); }} }}
  </style>
</head>
<body>
  <div class="loading">
    <div class="spinner"></div>
    正在導向綠界付款頁面，請稍候...
  </div>
  <form method="post" action="{action}" id="ecpayForm" style="display:none">
      {inputs}
    <input type="submit" value="送出參數">
  </form>
  <script>
    setTimeout(function() {{
      document.getElementById('ecpayForm').submit();
    }}, {delay});
  </script>
</body>
</html>
"#,
        action = escape_html(action),
        inputs = inputs,
        delay = AUTO_SUBMIT_DELAY_MS,
    )
}
