/// Extraction instruction sent to every candidate model alongside the
/// document payload. The reply contract is bare JSON with explicit nulls;
/// the parser still strips fences for models that wrap output anyway.
pub const EXTRACTION_PROMPT: &str = "\
You are a strictly logical Data Extraction Engine.
Analyze this Certificate of Insurance (COI) document.

Extract the following data strictly in JSON format. Do not include Markdown formatting (no ```json ... ```).

Keys to extract:
- producer_name (Insurance Broker)
- insured_name (Vendor Company Name)
- insurer_name (The Main Carrier Name)
- policy_expiration_date (YYYY-MM-DD format. Look for General Liability or Umbrella expiration. If multiple, take the earliest one.)
- general_liability_limit (Number only, remove currency symbols and commas. e.g. 1000000)
- confidence_score (Float between 0.0 and 1.0. 1.0 = clear text, 0.1 = blurry/illegible)

If a field is missing or illegible, return null.";
