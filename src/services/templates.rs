//! 题型模板登记表
//!
//! 以 (题型, 输出格式) 为键的静态配置。新增题型或格式只需在这里加一项。
//! 每个模板开头都有 `Câu X:[Chủ đề - Mức độ]` 占位，对应 {题号, 主题, 难度}。

use crate::models::exam::OutputFormat;
use crate::models::plan::QuestionType;

const LATEX_MCQ: &str = r"\begin{ex} %Câu X:[Chủ đề - Mức độ]
Nội dung câu hỏi với $công\ thức$.
\choice
{Đáp án A}
{Đáp án B}
{Đáp án C}
{\True Đáp án D đúng}
\loigiai{Lời giải chi tiết.\\}
\end{ex}";

const LATEX_TF: &str = r"\begin{ex} %Câu X:[Chủ đề - Mức độ]
Cho ... Xét đúng/sai các mệnh đề:
\choiceTF
{\True Mệnh đề đúng}
{Mệnh đề sai}
{\True Mệnh đề đúng}
{Mệnh đề sai}
\loigiai{Giải thích.\\}
\end{ex}";

const LATEX_SA: &str = r"\begin{ex} %Câu X:[Chủ đề - Mức độ]
Câu hỏi trả lời ngắn.
\shortans{Đáp án}
\loigiai{Lời giải tóm tắt.\\}
\end{ex}";

const WORD_MCQ: &str = r"Câu X: [Chủ đề - Mức độ] Nội dung câu hỏi với $công\ thức$?
A. Đáp án A
B. Đáp án B
C. Đáp án C
D. Đáp án D
(Đáp án đúng: D)
Lời giải: Giải thích chi tiết...";

const WORD_TF: &str = r"Câu X: [Chủ đề - Mức độ] Cho ... Xét tính đúng sai:
a) Mệnh đề 1 ($công\ thức$) -> ĐÚNG
b) Mệnh đề 2 -> SAI
c) Mệnh đề 3 -> ĐÚNG
d) Mệnh đề 4 -> SAI
Lời giải: Giải thích chi tiết...";

const WORD_SA: &str = r"Câu X: [Chủ đề - Mức độ] Nội dung câu hỏi?
Đáp án: $kết\ quả$
Lời giải: Giải thích chi tiết...";

/// 难度说明，附加在系统指令中
pub const DIFFICULTY_GUIDE: &str = "
- NB (Nhận biết): Nhớ lại, nhận ra kiến thức cơ bản.
- TH (Thông hiểu): Hiểu, diễn giải, áp dụng cơ bản.
- VD (Vận dụng): Áp dụng vào tình huống quen thuộc.
- VDC (Vận dụng cao): Phân tích, tổng hợp, giải quyết vấn đề mới.";

/// 示例块
pub fn template_for(question_type: QuestionType, output_format: OutputFormat) -> &'static str {
    match (output_format, question_type) {
        (OutputFormat::Latex, QuestionType::Mcq) => LATEX_MCQ,
        (OutputFormat::Latex, QuestionType::Tf) => LATEX_TF,
        (OutputFormat::Latex, QuestionType::Sa) => LATEX_SA,
        (OutputFormat::Word, QuestionType::Mcq) => WORD_MCQ,
        (OutputFormat::Word, QuestionType::Tf) => WORD_TF,
        (OutputFormat::Word, QuestionType::Sa) => WORD_SA,
    }
}

/// 格式要求
pub fn format_instructions(output_format: OutputFormat) -> &'static str {
    match output_format {
        OutputFormat::Latex => {
            "Tuân thủ nghiêm ngặt định dạng LaTeX gói ex_test. Dùng $...$ cho công thức toán."
        }
        OutputFormat::Word => {
            "Định dạng văn bản rõ ràng. QUAN TRỌNG: Tất cả công thức toán, biểu thức, biến số PHẢI viết dạng LaTeX và đặt trong cặp dấu $ (ví dụ: $x^2+1=0$). Không dùng Unicode cho toán học."
        }
    }
}
