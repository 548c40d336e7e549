/// Wrap `text` in the fixed GST analysis request.
///
/// Only `text` varies; the section list is static.
pub fn build_prompt(text: &str) -> String {
    format!(
        r#" Analyze the following text: {text} and create a detailed GST analysis report. The report should include the following sections:
    
    General Information
    - Acknowledgement Number
    - Date of filing
    - PAN
    - Name
    - Address
  
    Income Details
    - Total Income
  
    Tax Details
    - Taxable Income
    - Book Profit under MAT (where applicable)
    - Adjusted Total Income under AMT (where applicable)
    - Net Tax Payable
    - Interest and Fee Payable
    - Total Tax, Interest, and Fee Payable
    - Taxes Paid
    - (+) Tax Payable / (-) Refundable
  
    Business Performance
    - Current Year Business Loss (if any)
    - Profit or Loss Statement
  
    Accreted Income & Tax Details
    - Accreted Income as per Section 115TD
    - Additional Tax Payable u/s 115TD
    - Interest Payable u/s 115TE
    - Additional Tax and Interest Payable
    - Tax and Interest Paid
    - (+) Tax Payable / (-) Refundable
  
    Filing Information
    - Acknowledgement Number
    - Date of Filing
    - PAN
    - Status
    - Form Number
    - Filed u/s
    - e-Filing Acknowledgement Number
    - Income Tax Return Submission Details (including IP address, verification method, and date)"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolates_input_text_once() {
        let prompt = build_prompt("ITR-V for AY 2023-24");
        assert!(prompt.starts_with(" Analyze the following text: ITR-V for AY 2023-24 and create"));
        assert_eq!(prompt.matches("ITR-V for AY 2023-24").count(), 1);
    }

    #[test]
    fn lists_every_report_section() {
        let prompt = build_prompt("");
        for section in [
            "General Information",
            "Income Details",
            "Tax Details",
            "Business Performance",
            "Accreted Income & Tax Details",
            "Filing Information",
        ] {
            assert!(prompt.contains(section), "missing section {section}");
        }
    }

    #[test]
    fn braces_in_input_are_kept_literally() {
        assert!(build_prompt("{total}").contains("text: {total} and"));
    }
}
