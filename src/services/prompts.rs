//! 提示词模板

/// 毛重（千克）的数量标签
pub const GROSS_WEIGHT_LABEL: &str = "Total Gross Weight (KG)";

/// 货值（美元）的数量标签
pub const PRICE_LABEL: &str = "Total Value (USD)";

/// 实体字段抽取提示词
pub fn entity_prompt(document_text: &str) -> String {
    format!(
        r#"
You are an information extraction agent.
Your goal is to carefully read the following document text and extract key shipping information.

From the text below, identify and extract the following fields:
1. Bill of Lading Number
2. Container Number
3. Consignee Name
4. Consignee Address
5. Date of Export

Return the result **strictly in JSON format** with the following structure:

{{
  "bill_of_lading_number": "",
  "container_number": "",
  "consignee_name": "",
  "consignee_address": "",
  "date_of_export": ""
}}

If a field cannot be found, return an empty string for that field.
Do not add any explanation, text, or commentary. Only output valid JSON.

Document text:
{}
"#,
        document_text
    )
}

/// 数值列表抽取提示词
pub fn number_list_prompt(quantity_label: &str, document_text: &str) -> String {
    format!(
        "Extract All the numbers for {} into a list of numbers from the following documents. \
         Do not include any other text or numbers. \
         Here is the example output: [number1, number2, number3]\n\n{}",
        quantity_label, document_text
    )
}

/// 行项目计数提示词
pub fn line_item_count_prompt(document_text: &str) -> String {
    format!(
        "Count the number of distinct line items in the following documents. \
         Return only the count as a single integer. Do not include any explanation.\n\n{}",
        document_text
    )
}
