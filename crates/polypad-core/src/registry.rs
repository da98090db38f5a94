//! Static language registry.
//!
//! One descriptor per supported language: the sample program loaded into the
//! editor on selection, the syntax name the editor highlights with, the file
//! name shown on the editor pane, and the id the remote execution service
//! uses for the language. Pure data, never mutated after process start.

use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum LanguageId {
    Python,
    Java,
    C,
    Cpp,
    Javascript,
    Mysql,
}

impl LanguageId {
    pub fn all() -> Vec<LanguageId> {
        LanguageId::iter().collect()
    }

    pub fn parse(s: &str) -> Option<LanguageId> {
        LanguageId::iter().find(|e| e.to_string() == s)
    }

    /// The next language in registry order, wrapping around at the end.
    pub fn next(self) -> LanguageId {
        let all: Vec<LanguageId> = LanguageId::iter().collect();
        let index = all.iter().position(|l| *l == self).unwrap_or(0);
        all[(index + 1) % all.len()]
    }

    /// Whether this language can run on the embedded interpreter.
    pub fn executes_locally(self) -> bool {
        matches!(self, LanguageId::Python)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LanguageDescriptor {
    pub id: LanguageId,
    pub label: &'static str,
    pub editor_syntax: &'static str,
    pub file_name: &'static str,
    /// Language id on the remote execution service, when the service
    /// supports the language at all.
    pub remote_execution_id: Option<u32>,
    pub example: &'static str,
}

pub fn descriptor(id: LanguageId) -> &'static LanguageDescriptor {
    match id {
        LanguageId::Python => &PYTHON,
        LanguageId::Java => &JAVA,
        LanguageId::C => &C,
        LanguageId::Cpp => &CPP,
        LanguageId::Javascript => &JAVASCRIPT,
        LanguageId::Mysql => &MYSQL,
    }
}

static PYTHON: LanguageDescriptor = LanguageDescriptor {
    id: LanguageId::Python,
    label: "Python",
    editor_syntax: "python",
    file_name: "main.py",
    remote_execution_id: Some(71),
    example: r#"# Welcome to Python!
print("Hello, World!")

# List comprehension
numbers = [1, 2, 3, 4, 5]
squared = [x**2 for x in numbers]
print(f"Squared: {squared}")

# Function example
def fibonacci(n):
    if n <= 1:
        return n
    return fibonacci(n-1) + fibonacci(n-2)

for i in range(8):
    print(fibonacci(i), end=" ")
"#,
};

static JAVA: LanguageDescriptor = LanguageDescriptor {
    id: LanguageId::Java,
    label: "Java",
    editor_syntax: "java",
    file_name: "HelloWorld.java",
    remote_execution_id: Some(62),
    example: r#"// Welcome to Java!
public class HelloWorld {
    public static void main(String[] args) {
        System.out.println("Hello, World!");

        // Array example
        int[] numbers = {1, 2, 3, 4, 5};
        System.out.print("Numbers: ");
        for (int num : numbers) {
            System.out.print(num + " ");
        }

        // Method call
        System.out.println("\nFibonacci: " + fibonacci(10));
    }

    static int fibonacci(int n) {
        if (n <= 1) return n;
        return fibonacci(n-1) + fibonacci(n-2);
    }
}
"#,
};

static C: LanguageDescriptor = LanguageDescriptor {
    id: LanguageId::C,
    label: "C",
    editor_syntax: "c",
    file_name: "main.c",
    remote_execution_id: Some(50),
    example: r#"// Welcome to C!
#include <stdio.h>

int fibonacci(int n) {
    if (n <= 1) return n;
    return fibonacci(n-1) + fibonacci(n-2);
}

int main() {
    printf("Hello, World!\n");

    // Array example
    int numbers[] = {1, 2, 3, 4, 5};
    int size = sizeof(numbers) / sizeof(numbers[0]);

    printf("Numbers: ");
    for (int i = 0; i < size; i++) {
        printf("%d ", numbers[i]);
    }

    printf("\nFibonacci(10): %d\n", fibonacci(10));
    return 0;
}
"#,
};

static CPP: LanguageDescriptor = LanguageDescriptor {
    id: LanguageId::Cpp,
    label: "C++",
    editor_syntax: "cpp",
    file_name: "main.cpp",
    remote_execution_id: Some(54),
    example: r#"// Welcome to C++!
#include <iostream>
#include <vector>

using namespace std;

int fibonacci(int n) {
    if (n <= 1) return n;
    return fibonacci(n-1) + fibonacci(n-2);
}

int main() {
    cout << "Hello, World!" << endl;

    // Vector example
    vector<int> numbers = {1, 2, 3, 4, 5};
    cout << "Numbers: ";
    for (int num : numbers) {
        cout << num << " ";
    }

    cout << endl << "Fibonacci(10): " << fibonacci(10) << endl;
    return 0;
}
"#,
};

static JAVASCRIPT: LanguageDescriptor = LanguageDescriptor {
    id: LanguageId::Javascript,
    label: "JavaScript",
    editor_syntax: "javascript",
    file_name: "main.js",
    remote_execution_id: Some(63),
    example: r#"// Welcome to JavaScript!
console.log("Hello, World!");

// Array methods
const numbers = [1, 2, 3, 4, 5];
const squared = numbers.map(x => x * x);
console.log("Squared:", squared);

// Function example
function fibonacci(n) {
    if (n <= 1) return n;
    return fibonacci(n-1) + fibonacci(n-2);
}

// Modern syntax
const fibSequence = Array.from({length: 8}, (_, i) => fibonacci(i));
console.log("Fibonacci sequence:", fibSequence.join(" "));
"#,
};

static MYSQL: LanguageDescriptor = LanguageDescriptor {
    id: LanguageId::Mysql,
    label: "MySQL",
    editor_syntax: "sql",
    file_name: "queries.sql",
    remote_execution_id: Some(82),
    example: r#"-- Welcome to MySQL!
-- Create a sample table
CREATE TABLE users (
    id INT AUTO_INCREMENT PRIMARY KEY,
    name VARCHAR(100) NOT NULL,
    email VARCHAR(100) UNIQUE,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

-- Insert sample data
INSERT INTO users (name, email) VALUES
('Alice Johnson', 'alice@example.com'),
('Bob Smith', 'bob@example.com'),
('Charlie Brown', 'charlie@example.com');

-- Query examples
SELECT * FROM users;
SELECT name, email FROM users WHERE id > 1;
SELECT COUNT(*) as total_users FROM users;

-- Update and aggregate
UPDATE users SET name = 'Alice Williams' WHERE id = 1;
SELECT * FROM users ORDER BY created_at DESC;
"#,
};
